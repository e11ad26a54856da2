use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollegeType {
    #[serde(rename = "IT")]
    It,
    Management,
    #[default]
    Both,
}

impl CollegeType {
    /// 無法辨識的值一律視為 Both
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "it" => CollegeType::It,
            "management" => CollegeType::Management,
            _ => CollegeType::Both,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CollegeType::It => "IT",
            CollegeType::Management => "Management",
            CollegeType::Both => "IT & Management",
        }
    }
}

impl fmt::Display for CollegeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl ContactDetails {
    pub fn is_empty(&self) -> bool {
        self.phone.is_none() && self.email.is_none() && self.website.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeEntry {
    pub course: String,
    pub amount: String,
}

impl FeeEntry {
    pub fn new(course: impl Into<String>, amount: impl Into<String>) -> Self {
        Self {
            course: course.into(),
            amount: amount.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct College {
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub contact_details: ContactDetails,
    pub courses_available: Vec<String>,
    pub fees: Vec<FeeEntry>,
    #[serde(rename = "type", default)]
    pub college_type: CollegeType,
}

/// 呼叫端唯一看得到的搜尋結果
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Success(Vec<College>),
    NoResults { location: String },
    SearchFailed { location: String, message: String },
}

impl SearchOutcome {
    pub fn colleges(&self) -> &[College] {
        match self {
            SearchOutcome::Success(colleges) => colleges,
            _ => &[],
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SearchOutcome::Success(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_college_type_lenient_parse() {
        assert_eq!(CollegeType::parse_lenient("IT"), CollegeType::It);
        assert_eq!(CollegeType::parse_lenient(" management "), CollegeType::Management);
        assert_eq!(CollegeType::parse_lenient("Both"), CollegeType::Both);
        assert_eq!(CollegeType::parse_lenient("Engineering"), CollegeType::Both);
    }

    #[test]
    fn test_college_serializes_camel_case() {
        let college = College {
            name: "X".to_string(),
            address: "Y".to_string(),
            contact_details: ContactDetails::default(),
            courses_available: vec!["MBA".to_string()],
            fees: vec![FeeEntry::new("MBA", "1L")],
            college_type: CollegeType::It,
        };

        let value = serde_json::to_value(&college).unwrap();
        assert_eq!(value["coursesAvailable"][0], "MBA");
        assert_eq!(value["type"], "IT");
        assert_eq!(value["contactDetails"], serde_json::json!({}));
    }

    #[test]
    fn test_type_label_for_both() {
        assert_eq!(CollegeType::Both.label(), "IT & Management");
        assert_eq!(CollegeType::It.to_string(), "IT");
    }
}
