// Extraction LLM prompt templates.
// All prompts sent with the resume image are defined here.
// Category values stay in Korean: the client UI matches on them verbatim.

pub const PROFILE_PHOTO_PROMPT: &str = r#"You are an expert resume image analyst.
Locate ONLY the applicant's formal ID-style profile photo (a photograph that shows the applicant's face) and return its normalized coordinates as JSON.
The profile photo is usually a small rectangle or square at the very top of the resume, next to the name and contact details.
You MUST ignore every other image on the page: project screenshots, company logos, and any photos inside the career, activity, or portfolio sections.

Return exactly this structure:
{"x_min": <top-left x (0-1000)>, "y_min": <top-left y (0-1000)>, "x_max": <bottom-right x (0-1000)>, "y_max": <bottom-right y (0-1000)>}

Coordinates are integers on a 1000x1000 grid covering the whole image.
If there is no formal profile photo, return an empty string ("").
Do NOT include any explanation or text outside the JSON."#;

pub const RESUME_EXTRACTION_PROMPT: &str = r#"You are a professional resume analysis AI. Extract every piece of information you can read in this image and return it as precise JSON.

Use exactly the structure below. Set unknown values to an empty string "" or an empty array [].
{
  "name": "full name (keep both Korean and English if present)",
  "birthDate": "date of birth converted to YYYY/MM/DD",
  "phone": "phone number normalized to 010-XXXX-XXXX",
  "email": "email address",
  "address": "full address",
  "selfIntroduction": "all self-introduction, self-PR, motivation, personality and trait text combined",

  "educations": [
    {
      "school": "school name",
      "degree": "one of 고등학교 / 대학(2,3년) / 대학(4년) / 대학원",
      "subDegree": "석사 / 박사 (graduate school only)",
      "major": "major or department",
      "entryYear": "year of entry",
      "graduationYear": "year of graduation",
      "status": "one of 졸업 / 재학중 / 휴학중 / 중퇴 / 수료"
    }
  ],

  "careers": [
    {
      "company": "company or organization",
      "position": "title or rank",
      "department": "department",
      "startDate": "start date (YYYY-MM-DD)",
      "endDate": "end date (YYYY-MM-DD)",
      "isCurrent": "currently employed here (boolean)",
      "description": "duties, achievements and projects"
    }
  ],

  "certificates": [
    {
      "name": "certificate or exam name",
      "issuer": "issuing organization",
      "date": "year or date obtained (YYYY-MM-DD)",
      "score": "score, grade or result"
    }
  ],

  "languages": [
    {
      "language": "language name (영어 / 일본어 / 중국어 ...)",
      "level": "one of 초급 / 중급 / 고급 / 원어민 / 유창",
      "testName": "official test such as TOEIC / TOEFL / JLPT / HSK",
      "score": "score",
      "date": "test or certification date (YYYY-MM-DD)"
    }
  ],

  "computerSkills": [
    {
      "program": "program name (워드 / 엑셀 / 파워포인트 / 포토샵 ...)",
      "level": "one of 상 / 중 / 하",
      "description": "description of proficiency"
    }
  ],

  "specialties": [
    {
      "title": "one sentence combining the specialty and its level, e.g. '문서작성 잘함', '체력이 좋음'",
      "content": "always an empty string (\"\")"
    }
  ],

  "workPreferences": {
    "selectedJobs": ["desired jobs as an array"],
    "workType": ["정규직 / 계약직 / 인턴 / 아르바이트 ... as an array"],
    "workPeriod": "desired work period",
    "workDays": ["평일 / 주말 / 요일무관 ... as an array"],
    "workLocation": {
      "regions": ["desired regions as an array"],
      "address": "specific workplace address",
      "canWorkRemote": "remote work possible (boolean)"
    },
    "salary": "desired salary or hourly wage",
    "startDate": "available start date (YYYY-MM-DD)"
  },

  "employmentPreferences": {
    "military": "military service (군필 / 미필 / 면제)",
    "disability": "disability (장애 / 비장애)",
    "veteran": "national merit (대상 / 비대상)",
    "subsidy": "employment subsidy (대상 / 비대상)"
  },

  "portfolios": [
    {
      "name": "portfolio or project title",
      "type": "link / file",
      "url": "URL",
      "description": "project description",
      "skills": ["technologies used as an array"]
    }
  ],

  "awards": [
    {
      "name": "award or competition name",
      "issuer": "organizer",
      "date": "award date (YYYY-MM-DD)",
      "description": "award details"
    }
  ],

  "activities": [
    {
      "name": "activity (club / volunteering / external activity ...)",
      "organization": "organization",
      "position": "role",
      "startDate": "start date (YYYY-MM-DD)",
      "endDate": "end date (YYYY-MM-DD)",
      "description": "what was done"
    }
  ]
}

RULES:
1. Every date uses YYYY-MM-DD.
2. Phone numbers are normalized to 010-0000-0000.
3. Boolean values are true or false.
4. If a value is unclear, use "" or [].
5. Do not guess: extract only what can be clearly read from the image.
6. Where Korean and English are mixed, keep both.
7. Return valid JSON only.
8. Do NOT add any field that is not defined above (no extraneous keys)."#;

/// Reduced prompt used after the full extraction returns unparseable JSON.
pub const BASIC_INFO_PROMPT: &str = r#"Extract only the basic information from this image and return it as simple JSON:
{
  "name": "name",
  "phone": "phone number",
  "email": "email",
  "address": "address",
  "selfIntroduction": "self-introduction"
}
Return JSON only."#;
