pub const INDIAN_STATES: &[&str] = &[
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
    "Andaman and Nicobar Islands",
    "Chandigarh",
    "Dadra and Nagar Haveli and Daman and Diu",
    "Delhi",
    "Jammu and Kashmir",
    "Ladakh",
    "Lakshadweep",
    "Puducherry",
];

pub const MAJOR_CITIES: &[&str] = &[
    "Mumbai", "Delhi", "Bangalore", "Hyderabad", "Ahmedabad", "Chennai",
    "Kolkata", "Surat", "Pune", "Jaipur", "Lucknow", "Kanpur", "Nagpur",
    "Indore", "Thane", "Bhopal", "Visakhapatnam", "Pimpri-Chinchwad",
    "Patna", "Vadodara", "Ghaziabad", "Ludhiana", "Agra", "Nashik",
    "Faridabad", "Meerut", "Rajkot", "Kalyan-Dombivali", "Vasai-Virar",
    "Varanasi", "Srinagar", "Aurangabad", "Dhanbad", "Amritsar", "Navi Mumbai",
    "Allahabad", "Ranchi", "Howrah", "Coimbatore", "Jabalpur", "Gwalior",
    "Vijayawada", "Jodhpur", "Madurai", "Raipur", "Kota", "Guwahati",
    "Chandigarh", "Solapur", "Hubballi-Dharwad", "Tiruchirappalli", "Bareilly",
    "Mysore", "Tiruppur", "Gurgaon", "Aligarh", "Jalandhar", "Bhubaneswar",
    "Salem", "Mira-Bhayandar", "Warangal", "Guntur", "Bhiwandi", "Saharanpur",
    "Gorakhpur", "Bikaner", "Amravati", "Noida", "Jamshedpur", "Bhilai",
    "Cuttack", "Firozabad", "Kochi", "Nellore", "Bhavnagar", "Dehradun",
    "Durgapur", "Asansol", "Rourkela", "Nanded", "Kolhapur", "Ajmer",
    "Akola", "Gulbarga", "Jamnagar", "Ujjain", "Loni", "Siliguri",
    "Jhansi", "Ulhasnagar", "Jammu", "Sangli-Miraj & Kupwad", "Mangalore",
    "Erode", "Belgaum", "Ambattur", "Tirunelveli", "Malegaon", "Gaya",
    "Jalgaon", "Udaipur", "Maheshtala",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationKind {
    #[default]
    State,
    City,
}

impl LocationKind {
    pub fn options(&self) -> &'static [&'static str] {
        match self {
            LocationKind::State => INDIAN_STATES,
            LocationKind::City => MAJOR_CITIES,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LocationKind::State => "State",
            LocationKind::City => "City",
        }
    }

    /// 不分大小寫比對清單，回傳清單中的正式名稱
    pub fn find(&self, name: &str) -> Option<&'static str> {
        let needle = name.trim();
        self.options()
            .iter()
            .copied()
            .find(|candidate| candidate.eq_ignore_ascii_case(needle))
    }
}

/// 表單狀態：清單選項與自訂輸入互斥，切換種類時兩者都清空
#[derive(Debug, Clone, Default)]
pub struct LocationSelection {
    kind: LocationKind,
    selected: Option<&'static str>,
    custom: String,
}

impl LocationSelection {
    pub fn new(kind: LocationKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn kind(&self) -> LocationKind {
        self.kind
    }

    pub fn switch_kind(&mut self, kind: LocationKind) {
        self.kind = kind;
        self.selected = None;
        self.custom.clear();
    }

    /// 從目前種類的清單中選擇；名稱不在清單中時回傳 false 且不改變狀態
    pub fn select(&mut self, name: &str) -> bool {
        match self.kind.find(name) {
            Some(found) => {
                self.selected = Some(found);
                self.custom.clear();
                true
            }
            None => false,
        }
    }

    pub fn set_custom(&mut self, text: &str) {
        self.custom = text.to_string();
        self.selected = None;
    }

    /// 可送出的搜尋地點；空白輸入不送出
    pub fn resolve(&self) -> Option<String> {
        let location = match self.selected {
            Some(selected) => selected,
            None => self.custom.as_str(),
        };
        let trimmed = location.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}
