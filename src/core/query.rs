use chrono::{Datelike, Local, NaiveDate};

/// 印度學年從六月開始，例如 2024 年 7 月屬於 "2024-25"
pub fn academic_year(date: NaiveDate) -> String {
    let start = if date.month() >= 6 {
        date.year()
    } else {
        date.year() - 1
    };
    format!("{}-{:02}", start, (start + 1).rem_euclid(100))
}

#[derive(Debug, Clone)]
pub struct QueryBuilder {
    academic_year: String,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::for_date(Local::now().date_naive())
    }

    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            academic_year: academic_year(date),
        }
    }

    pub fn primary_prompt(&self, location: &str) -> String {
        format!(
            r#"Find ALL available IT and Management colleges in {location}, India. Please provide a comprehensive list of educational institutions including universities, colleges, institutes, and schools that offer IT or Management courses.

Respond with a JSON array in exactly this shape:
[
  {{
    "name": "Exact college name",
    "address": "Complete postal address",
    "contactDetails": {{
      "phone": "Phone number with country code",
      "email": "Official email address",
      "website": "Official website URL"
    }},
    "coursesAvailable": [
      "List specific IT and Management courses offered"
    ],
    "fees": [
      {{
        "course": "Course name",
        "amount": "Fee amount in Indian Rupees"
      }}
    ],
    "type": "IT" or "Management" or "Both"
  }}
]

Requirements:
- Find AT LEAST 20-30 colleges, include ALL available institutions in {location}
- Include ALL types: Government, Private, Deemed, Autonomous, State Universities
- Include technical institutes, engineering colleges, management institutes
- Include both undergraduate and postgraduate institutions
- Cover all categories:
  * Central Universities (if any)
  * State Universities
  * Private Universities
  * Deemed Universities
  * Engineering Colleges
  * Management Institutes
  * Technical Institutes
  * Polytechnics offering degree courses
  * Professional colleges
- Include famous institutions like IITs, NITs, IIMs, IIITs if present
- Include all local colleges and universities
- Provide actual contact details for each
- Include current {year} fee structures
- Focus on institutions offering:
  * IT/Computer courses: B.Tech CSE, B.Tech IT, BCA, MCA, M.Tech, Data Science, AI/ML, Cyber Security
  * Management courses: MBA, BBA, PGDM, Executive MBA, Hospital Management, Hotel Management
- Don't limit the search, provide extensive coverage of {location}

Return only the JSON array, no markdown formatting or extra text. Make the list as comprehensive as possible."#,
            location = location,
            year = self.academic_year,
        )
    }

    pub fn fallback_prompt(&self, location: &str) -> String {
        format!(
            "List ALL colleges and universities in {location}, India that offer IT or Management courses. \
             Include government, private, deemed universities, engineering colleges, management institutes. \
             Provide at least 15-20 institutions. For each college, provide: name, address, phone, email, \
             website, courses offered, and fees. Format as JSON array with complete information.",
            location = location,
        )
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
