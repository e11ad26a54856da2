use crate::domain::model::{College, CollegeType, ContactDetails, FeeEntry};
use crate::utils::error::{FinderError, Result};
use serde_json::{Map, Value};

pub const DEFAULT_PHONE: &str = "Contact college directly";
pub const DEFAULT_EMAIL: &str = "Not available";
pub const DEFAULT_WEBSITE: &str = "Not available";

pub fn default_courses() -> Vec<String> {
    vec![
        "B.Tech Computer Science".to_string(),
        "MBA".to_string(),
        "BBA".to_string(),
    ]
}

pub fn default_fees() -> Vec<FeeEntry> {
    vec![
        FeeEntry::new("B.Tech", "₹1,50,000 - ₹3,00,000 per year"),
        FeeEntry::new("MBA", "₹2,00,000 - ₹5,00,000 per year"),
    ]
}

/// 兩種驗證策略：主要查詢丟棄不完整的項目，備援查詢以預設值補齊
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationPolicy {
    DropInvalid,
    FillDefaults,
}

/// 移除 ```json / ``` 標記並去除前後空白
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json\n", "")
        .replace("```json", "")
        .replace("```\n", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// 取第一個 '[' 到最後一個 ']' 的範圍（非括號配對解析）
pub fn bracket_span(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end > start {
        Some(&text[start..=end])
    } else {
        None
    }
}

/// 從模型原始輸出取出 JSON 陣列
pub fn extract_array(raw: &str) -> Result<Vec<Value>> {
    let cleaned = strip_code_fences(raw);
    let candidate = bracket_span(&cleaned).unwrap_or(cleaned.as_str());

    let value: Value = serde_json::from_str(candidate).map_err(|e| FinderError::ParseError {
        message: format!("invalid JSON: {}", e),
    })?;

    match value {
        Value::Array(items) => Ok(items),
        other => Err(FinderError::ParseError {
            message: format!("expected a JSON array, got {}", json_kind(&other)),
        }),
    }
}

/// 解析並套用驗證策略；空結果不是錯誤，由呼叫端決定是否重試
pub fn normalize(raw: &str, policy: ValidationPolicy, location: &str) -> Result<Vec<College>> {
    let items = extract_array(raw)?;
    let total = items.len();

    let colleges: Vec<College> = match policy {
        ValidationPolicy::DropInvalid => items.iter().filter_map(validate_entry).collect(),
        ValidationPolicy::FillDefaults => items
            .iter()
            .map(|item| fill_defaults(item, location))
            .collect(),
    };

    if colleges.len() < total {
        tracing::debug!(
            "Dropped {} of {} entries that were missing required fields",
            total - colleges.len(),
            total
        );
    }

    Ok(colleges)
}

fn validate_entry(item: &Value) -> Option<College> {
    let obj = item.as_object()?;

    let name = non_empty_string(obj.get("name"))?;
    let address = non_empty_string(obj.get("address"))?;
    let courses_available = string_list(obj.get("coursesAvailable")?)?;
    if courses_available.is_empty() {
        return None;
    }
    let fees = fee_list(obj.get("fees")?)?;

    Some(College {
        name,
        address,
        contact_details: obj
            .get("contactDetails")
            .map(contact_details)
            .unwrap_or_default(),
        courses_available,
        fees,
        college_type: college_type(obj.get("type")),
    })
}

fn fill_defaults(item: &Value, location: &str) -> College {
    let empty = Map::new();
    let obj = item.as_object().unwrap_or(&empty);
    let nested = obj
        .get("contactDetails")
        .map(contact_details)
        .unwrap_or_default();

    // 扁平欄位優先於 contactDetails
    let phone = non_empty_string(obj.get("phone"))
        .or(nested.phone)
        .unwrap_or_else(|| DEFAULT_PHONE.to_string());
    let email = non_empty_string(obj.get("email"))
        .or(nested.email)
        .unwrap_or_else(|| DEFAULT_EMAIL.to_string());
    let website = non_empty_string(obj.get("website"))
        .or(nested.website)
        .unwrap_or_else(|| DEFAULT_WEBSITE.to_string());

    let courses_available = ["courses", "coursesAvailable"]
        .iter()
        .filter_map(|key| obj.get(*key))
        .find_map(|value| match lenient_string_list(value) {
            Some(courses) if !courses.is_empty() || is_empty_array(value) => Some(courses),
            _ => None,
        })
        .unwrap_or_else(default_courses);

    let fees = match obj.get("fees") {
        Some(value) => match lenient_fee_list(value) {
            Some(fees) if !fees.is_empty() || is_empty_array(value) => fees,
            _ => default_fees(),
        },
        None => default_fees(),
    };

    College {
        name: non_empty_string(obj.get("name"))
            .unwrap_or_else(|| format!("College in {}", location)),
        address: non_empty_string(obj.get("address"))
            .unwrap_or_else(|| format!("{}, India", location)),
        contact_details: ContactDetails {
            phone: Some(phone),
            email: Some(email),
            website: Some(website),
        },
        courses_available,
        fees,
        college_type: college_type(obj.get("type")),
    }
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    let text = value?.as_str()?.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    let items = value.as_array()?;
    Some(items.iter().filter_map(scalar_string).collect())
}

fn is_empty_array(value: &Value) -> bool {
    value.as_array().is_some_and(Vec::is_empty)
}

/// 備援路徑也接受以逗號分隔的字串，以及 {"name": ...} 形式的課程物件
fn lenient_string_list(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| match item {
                    Value::Object(obj) => obj
                        .get("name")
                        .or_else(|| obj.get("course"))
                        .and_then(scalar_string),
                    other => scalar_string(other),
                })
                .collect(),
        ),
        Value::String(s) => {
            let parts: Vec<String> = s
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts)
            }
        }
        other => string_list(other),
    }
}

fn fee_list(value: &Value) -> Option<Vec<FeeEntry>> {
    let rows = value.as_array()?;
    Some(
        rows.iter()
            .filter_map(|row| {
                let row = row.as_object()?;
                let course = row.get("course").and_then(scalar_string)?;
                let amount = row.get("amount").and_then(scalar_string)?;
                Some(FeeEntry { course, amount })
            })
            .collect(),
    )
}

/// 備援路徑的費用列也可以是 "課程: 金額" 字串
fn lenient_fee_list(value: &Value) -> Option<Vec<FeeEntry>> {
    let rows = value.as_array()?;
    Some(
        rows.iter()
            .filter_map(|row| match row {
                Value::String(text) => fee_from_text(text),
                Value::Object(obj) => {
                    let course = obj
                        .get("course")
                        .or_else(|| obj.get("name"))
                        .and_then(scalar_string)
                        .unwrap_or_else(|| "General".to_string());
                    let amount = obj
                        .get("amount")
                        .or_else(|| obj.get("fee"))
                        .and_then(scalar_string)?;
                    Some(FeeEntry { course, amount })
                }
                _ => None,
            })
            .collect(),
    )
}

fn fee_from_text(text: &str) -> Option<FeeEntry> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    match text.split_once(':') {
        Some((course, amount)) if !course.trim().is_empty() && !amount.trim().is_empty() => {
            Some(FeeEntry::new(course.trim(), amount.trim()))
        }
        _ => Some(FeeEntry::new("General", text)),
    }
}

fn contact_details(value: &Value) -> ContactDetails {
    match value.as_object() {
        Some(obj) => ContactDetails {
            phone: obj.get("phone").and_then(scalar_string),
            email: non_empty_string(obj.get("email")),
            website: non_empty_string(obj.get("website")),
        },
        None => ContactDetails::default(),
    }
}

fn college_type(value: Option<&Value>) -> CollegeType {
    value
        .and_then(Value::as_str)
        .map(CollegeType::parse_lenient)
        .unwrap_or_default()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAHARASHTRA_RESPONSE: &str = "```json\n[{\"name\":\"X\",\"address\":\"Y\",\"coursesAvailable\":[\"MBA\"],\"fees\":[{\"course\":\"MBA\",\"amount\":\"1L\"}]}]\n```";

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fences("  ```[2]```  "), "[2]");
        assert_eq!(strip_code_fences("plain"), "plain");
    }

    #[test]
    fn test_bracket_span_is_greedy() {
        assert_eq!(bracket_span("see [1] and [2] ok"), Some("[1] and [2]"));
        assert_eq!(bracket_span("no array here"), None);
        assert_eq!(bracket_span("] backwards ["), None);
    }

    #[test]
    fn test_extract_array_ignores_surrounding_prose() {
        let raw = "Here are the colleges you asked for:\n```json\n[{\"name\": \"A\"}, {\"name\": \"B\"}]\n```\nLet me know if you need more.";
        let items = extract_array(raw).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["name"], "B");
    }

    #[test]
    fn test_extract_array_reports_parse_errors() {
        assert!(matches!(
            extract_array("I could not find anything."),
            Err(FinderError::ParseError { .. })
        ));
        assert!(matches!(
            extract_array("[{\"name\": \"broken\",]"),
            Err(FinderError::ParseError { .. })
        ));
        assert!(matches!(
            extract_array("{\"colleges\": 3}"),
            Err(FinderError::ParseError { .. })
        ));
    }

    #[test]
    fn test_primary_scenario_maharashtra() {
        let colleges =
            normalize(MAHARASHTRA_RESPONSE, ValidationPolicy::DropInvalid, "Maharashtra").unwrap();

        assert_eq!(colleges.len(), 1);
        assert_eq!(colleges[0].name, "X");
        assert_eq!(colleges[0].address, "Y");
        assert_eq!(colleges[0].college_type, CollegeType::Both);
        assert_eq!(colleges[0].contact_details, ContactDetails::default());
        assert_eq!(colleges[0].fees, vec![FeeEntry::new("MBA", "1L")]);
    }

    #[test]
    fn test_primary_drops_entries_missing_required_fields() {
        let raw = r#"[
            {"name": "Complete", "address": "A", "coursesAvailable": ["BCA"], "fees": [], "type": "IT",
             "contactDetails": {"phone": "+91 1", "website": "https://c.example"}},
            {"address": "A", "coursesAvailable": ["BCA"], "fees": []},
            {"name": "No address", "coursesAvailable": ["BCA"], "fees": []},
            {"name": "No courses", "address": "A", "fees": []},
            {"name": "Courses not a list", "address": "A", "coursesAvailable": "BCA", "fees": []},
            {"name": "No fees", "address": "A", "coursesAvailable": ["BCA"]},
            {"name": "Fees not a list", "address": "A", "coursesAvailable": ["BCA"], "fees": "cheap"},
            "just a string"
        ]"#;

        let colleges = normalize(raw, ValidationPolicy::DropInvalid, "Pune").unwrap();
        assert_eq!(colleges.len(), 1);
        assert_eq!(colleges[0].name, "Complete");
        assert_eq!(colleges[0].college_type, CollegeType::It);
        assert_eq!(colleges[0].contact_details.phone.as_deref(), Some("+91 1"));
        assert_eq!(colleges[0].contact_details.email, None);
    }

    #[test]
    fn test_primary_defaults_unrecognized_type() {
        let raw = r#"[{"name": "N", "address": "A", "coursesAvailable": ["MCA"], "fees": [{"course": "MCA", "amount": 90000}], "type": "Engineering"}]"#;
        let colleges = normalize(raw, ValidationPolicy::DropInvalid, "Goa").unwrap();
        assert_eq!(colleges[0].college_type, CollegeType::Both);
        assert_eq!(colleges[0].fees[0].amount, "90000");
    }

    #[test]
    fn test_primary_empty_array_is_not_an_error() {
        let colleges = normalize("[]", ValidationPolicy::DropInvalid, "Goa").unwrap();
        assert!(colleges.is_empty());
    }

    #[test]
    fn test_fallback_never_drops_and_fills_everything() {
        let raw = r#"[{}, "junk", {"name": "Named", "courses": ["BCA", "MCA"], "phone": "+91 2",
                      "contactDetails": {"phone": "ignored", "email": "info@named.example"}}]"#;
        let colleges = normalize(raw, ValidationPolicy::FillDefaults, "Nagpur").unwrap();

        assert_eq!(colleges.len(), 3);
        for college in &colleges {
            assert!(!college.name.is_empty());
            assert!(!college.address.is_empty());
            assert!(college.contact_details.phone.is_some());
            assert!(college.contact_details.email.is_some());
            assert!(college.contact_details.website.is_some());
            assert!(!college.fees.is_empty());
        }

        assert_eq!(colleges[0].name, "College in Nagpur");
        assert_eq!(colleges[0].address, "Nagpur, India");
        assert_eq!(colleges[0].courses_available, default_courses());
        assert_eq!(colleges[0].fees, default_fees());
        assert_eq!(colleges[0].contact_details.phone.as_deref(), Some(DEFAULT_PHONE));

        let named = &colleges[2];
        assert_eq!(named.name, "Named");
        assert_eq!(named.courses_available, vec!["BCA", "MCA"]);
        assert_eq!(named.contact_details.phone.as_deref(), Some("+91 2"));
        assert_eq!(
            named.contact_details.email.as_deref(),
            Some("info@named.example")
        );
        assert_eq!(named.contact_details.website.as_deref(), Some(DEFAULT_WEBSITE));
        assert_eq!(named.college_type, CollegeType::Both);
    }

    #[test]
    fn test_fallback_maps_comma_separated_courses() {
        let raw = r#"[{"name": "C", "courses": "BBA, MBA , "}]"#;
        let colleges = normalize(raw, ValidationPolicy::FillDefaults, "Indore").unwrap();
        assert_eq!(colleges[0].courses_available, vec!["BBA", "MBA"]);
    }

    #[test]
    fn test_fallback_keeps_present_empty_course_list() {
        let raw = r#"[{"name": "C", "coursesAvailable": []}]"#;
        let colleges = normalize(raw, ValidationPolicy::FillDefaults, "Indore").unwrap();
        assert!(colleges[0].courses_available.is_empty());
    }

    #[test]
    fn test_fallback_parses_text_fee_rows() {
        let raw = r#"[{"name": "C", "fees": ["B.Tech: 1.5L per year", "MBA: 3L", "Contact office"]}]"#;
        let colleges = normalize(raw, ValidationPolicy::FillDefaults, "Indore").unwrap();
        assert_eq!(
            colleges[0].fees,
            vec![
                FeeEntry::new("B.Tech", "1.5L per year"),
                FeeEntry::new("MBA", "3L"),
                FeeEntry::new("General", "Contact office"),
            ]
        );
    }

    #[test]
    fn test_fallback_unusable_rows_fall_back_to_defaults() {
        let raw = r#"[{"name": "C", "courses": [{"name": "BCA"}, {"course": "MCA"}], "fees": [null, 42, {}]},
                      {"name": "D", "courses": [null, {}]}]"#;
        let colleges = normalize(raw, ValidationPolicy::FillDefaults, "Indore").unwrap();

        assert_eq!(colleges[0].courses_available, vec!["BCA", "MCA"]);
        assert_eq!(colleges[0].fees, default_fees());
        assert_eq!(colleges[1].courses_available, default_courses());
        assert!(!colleges[1].fees.is_empty());
    }
}
