use log::info;

// Upstream day codes: Monday is 1, Sunday is 7.
const WEEKDAYS: [(&str, &str, &str); 7] = [
    ("월요일", "월", "1"),
    ("화요일", "화", "2"),
    ("수요일", "수", "3"),
    ("목요일", "목", "4"),
    ("금요일", "금", "5"),
    ("토요일", "토", "6"),
    ("일요일", "일", "7"),
];

const HOLIDAY_LABELS: [&str; 2] = ["공휴일", "휴일"];

/// Translates localized weekday labels into upstream day codes.
#[derive(Debug, Clone)]
pub struct WeekdayTable {
    holiday_code: String,
}

impl WeekdayTable {
    pub fn new(holiday_code: impl Into<String>) -> Self {
        Self {
            holiday_code: holiday_code.into(),
        }
    }

    /// Returns the code for a known label, or `None`.
    pub fn code_for(&self, label: &str) -> Option<&str> {
        let label = label.trim();
        if HOLIDAY_LABELS.contains(&label) {
            return Some(&self.holiday_code);
        }
        WEEKDAYS
            .iter()
            .find(|(long, short, _)| *long == label || *short == label)
            .map(|(_, _, code)| *code)
    }

    /// Maps a known label to its code; anything else passes through
    /// unchanged so upstream-native and future codes keep working.
    pub fn resolve(&self, value: &str) -> String {
        match self.code_for(value) {
            Some(code) => {
                info!("Weekday mapped: original={:?} code={:?}", value, code);
                code.to_string()
            }
            None => {
                info!("Weekday passed through unchanged: {:?}", value);
                value.to_string()
            }
        }
    }
}

impl Default for WeekdayTable {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_HOLIDAY_CODE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_weekday_label() {
        let table = WeekdayTable::default();
        let expected = [
            ("월요일", "1"),
            ("화요일", "2"),
            ("수요일", "3"),
            ("목요일", "4"),
            ("금요일", "5"),
            ("토요일", "6"),
            ("일요일", "7"),
        ];
        for (label, code) in expected {
            assert_eq!(table.resolve(label), code, "label {}", label);
        }
    }

    #[test]
    fn accepts_short_labels_and_whitespace() {
        let table = WeekdayTable::default();
        assert_eq!(table.resolve("수"), "3");
        assert_eq!(table.resolve(" 금요일 "), "5");
    }

    #[test]
    fn holiday_uses_configured_code() {
        assert_eq!(WeekdayTable::default().resolve("공휴일"), "8");
        assert_eq!(WeekdayTable::new("0").resolve("공휴일"), "0");
        assert_eq!(WeekdayTable::new("0").resolve("휴일"), "0");
    }

    #[test]
    fn unknown_values_pass_through() {
        let table = WeekdayTable::default();
        assert_eq!(table.resolve("3"), "3");
        assert_eq!(table.resolve("Monday"), "Monday");
        assert_eq!(table.code_for("Monday"), None);
    }
}
