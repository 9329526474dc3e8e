use serde::{Deserialize, Serialize};

use crate::models::ResumeRecord;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletenessAnalysis {
    /// 0 – 100
    pub completeness_score: u32,
    pub missing_sections: Vec<String>,
    pub improvement_suggestions: Vec<String>,
    pub strengths: Vec<String>,
}

/// One of the ten scored resume sections.
struct SectionRule {
    is_complete: fn(&ResumeRecord) -> bool,
    strength: &'static str,
    /// Reported under `missing_sections` when incomplete.
    missing: Option<&'static str>,
    /// Reported under `improvement_suggestions` when incomplete.
    suggestion: Option<&'static str>,
    /// Extra checks that only run once the section is complete.
    follow_up: Option<fn(&ResumeRecord, &mut CompletenessAnalysis)>,
}

const MIN_SELF_INTRODUCTION_CHARS: usize = 50;
const DETAILED_DESCRIPTION_CHARS: usize = 20;

const SECTION_RULES: &[SectionRule] = &[
    SectionRule {
        is_complete: |r| !r.name.is_empty() && !r.phone.is_empty() && !r.email.is_empty(),
        strength: "Complete contact information",
        missing: Some("Contact information"),
        suggestion: None,
        follow_up: None,
    },
    SectionRule {
        is_complete: |r| r.self_introduction.chars().count() > MIN_SELF_INTRODUCTION_CHARS,
        strength: "Self-introduction written",
        missing: Some("Self-introduction"),
        suggestion: Some("Write a specific, impactful self-introduction"),
        follow_up: None,
    },
    SectionRule {
        is_complete: |r| !r.educations.is_empty(),
        strength: "Education history listed",
        missing: Some("Education"),
        suggestion: None,
        follow_up: None,
    },
    SectionRule {
        is_complete: |r| !r.careers.is_empty(),
        strength: "Work experience listed",
        missing: Some("Work experience"),
        suggestion: None,
        follow_up: Some(check_career_detail),
    },
    SectionRule {
        is_complete: |r| !r.certificates.is_empty(),
        strength: "Certificates held",
        missing: None,
        suggestion: Some("Consider earning certificates relevant to your target job"),
        follow_up: None,
    },
    SectionRule {
        is_complete: |r| !r.languages.is_empty(),
        strength: "Foreign language ability",
        missing: None,
        suggestion: Some("Improve foreign language skills and record official test scores"),
        follow_up: None,
    },
    SectionRule {
        is_complete: |r| !r.computer_skills.is_empty(),
        strength: "Computer proficiency",
        missing: Some("Computer skills"),
        suggestion: None,
        follow_up: None,
    },
    SectionRule {
        is_complete: |r| !r.portfolios.is_empty(),
        strength: "Portfolio available",
        missing: None,
        suggestion: Some("Build a project portfolio"),
        follow_up: None,
    },
    SectionRule {
        is_complete: |r| !r.work_preferences.selected_jobs.is_empty(),
        strength: "Clear target job",
        missing: Some("Desired job"),
        suggestion: Some("Set a specific target job"),
        follow_up: None,
    },
    SectionRule {
        is_complete: |r| !r.specialties.is_empty(),
        strength: "Specialties and skills listed",
        missing: None,
        suggestion: None,
        follow_up: None,
    },
];

fn check_career_detail(record: &ResumeRecord, analysis: &mut CompletenessAnalysis) {
    let detailed = record
        .careers
        .iter()
        .any(|c| c.description.chars().count() > DETAILED_DESCRIPTION_CHARS);
    if detailed {
        analysis
            .strengths
            .push("Detailed job descriptions".to_string());
    } else {
        analysis.improvement_suggestions.push(
            "Add detailed, achievement-focused descriptions for each role".to_string(),
        );
    }
}

/// Scores how many of the ten sections are filled in.
/// `completeness_score = round(completed / 10 × 100)`.
pub fn analyze_completeness(record: &ResumeRecord) -> CompletenessAnalysis {
    let mut analysis = CompletenessAnalysis::default();
    let mut completed = 0usize;

    for rule in SECTION_RULES {
        if (rule.is_complete)(record) {
            completed += 1;
            analysis.strengths.push(rule.strength.to_string());
            if let Some(follow_up) = rule.follow_up {
                follow_up(record, &mut analysis);
            }
        } else {
            if let Some(missing) = rule.missing {
                analysis.missing_sections.push(missing.to_string());
            }
            if let Some(suggestion) = rule.suggestion {
                analysis.improvement_suggestions.push(suggestion.to_string());
            }
        }
    }

    let ratio = completed as f64 / SECTION_RULES.len() as f64;
    analysis.completeness_score = (ratio * 100.0).round().clamp(0.0, 100.0) as u32;
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{
        Career, Certificate, ComputerSkill, Education, LanguageSkill, Portfolio, Specialty,
    };

    fn full_record() -> ResumeRecord {
        let mut record = ResumeRecord {
            name: "박지은".into(),
            phone: "010-1111-2222".into(),
            email: "jieun@example.com".into(),
            self_introduction: "I build reliable backend services and enjoy mentoring new team members on code review.".into(),
            educations: vec![Education::default()],
            careers: vec![Career {
                company: "ACME".into(),
                description: "Led the migration of billing to a new platform".into(),
                ..Career::default()
            }],
            certificates: vec![Certificate::default()],
            languages: vec![LanguageSkill::default()],
            computer_skills: vec![ComputerSkill::default()],
            portfolios: vec![Portfolio::default()],
            specialties: vec![Specialty::default()],
            ..ResumeRecord::default()
        };
        record.work_preferences.selected_jobs = vec!["백엔드 개발".into()];
        record
    }

    #[test]
    fn test_empty_record_scores_zero() {
        let analysis = analyze_completeness(&ResumeRecord::default());
        assert_eq!(analysis.completeness_score, 0);
        assert!(analysis.strengths.is_empty());
        assert_eq!(
            analysis.missing_sections,
            vec![
                "Contact information",
                "Self-introduction",
                "Education",
                "Work experience",
                "Computer skills",
                "Desired job"
            ]
        );
        assert_eq!(analysis.improvement_suggestions.len(), 5);
    }

    #[test]
    fn test_full_record_scores_hundred() {
        let analysis = analyze_completeness(&full_record());
        assert_eq!(analysis.completeness_score, 100);
        assert!(analysis.missing_sections.is_empty());
        assert!(analysis.improvement_suggestions.is_empty());
        assert!(analysis
            .strengths
            .contains(&"Detailed job descriptions".to_string()));
        assert_eq!(analysis.strengths.len(), 11);
    }

    #[test]
    fn test_partial_contact_is_incomplete() {
        let record = ResumeRecord {
            name: "Kim".into(),
            phone: "010-0000-0000".into(),
            ..ResumeRecord::default()
        };
        let analysis = analyze_completeness(&record);
        assert_eq!(analysis.completeness_score, 0);
        assert!(analysis
            .missing_sections
            .contains(&"Contact information".to_string()));
    }

    #[test]
    fn test_self_introduction_must_exceed_fifty_chars() {
        let mut record = ResumeRecord {
            self_introduction: "가".repeat(50),
            ..ResumeRecord::default()
        };
        assert_eq!(analyze_completeness(&record).completeness_score, 0);

        record.self_introduction.push('나');
        assert_eq!(analyze_completeness(&record).completeness_score, 10);
    }

    #[test]
    fn test_terse_careers_get_a_suggestion() {
        let record = ResumeRecord {
            careers: vec![Career {
                description: "Dev".into(),
                ..Career::default()
            }],
            ..ResumeRecord::default()
        };
        let analysis = analyze_completeness(&record);
        assert_eq!(analysis.completeness_score, 10);
        assert!(analysis
            .improvement_suggestions
            .iter()
            .any(|s| s.contains("achievement-focused")));
    }

    #[test]
    fn test_score_counts_each_section_as_ten_points() {
        let mut record = full_record();
        record.portfolios.clear();
        record.specialties.clear();
        record.languages.clear();
        assert_eq!(analyze_completeness(&record).completeness_score, 70);
    }
}
