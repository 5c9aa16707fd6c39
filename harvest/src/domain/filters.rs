use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Query parameters for `GET /time_entries`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub from: Option<Date>,
    pub to: Option<Date>,
}

impl ListParams {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            per_page: Some(limit.clamp(1, 2000)),
            ..Self::default()
        }
    }

    pub(crate) fn as_query(&self) -> Vec<(&'static str, Option<String>)> {
        let format_date = |date: &Date| date.format(DATE_FORMAT).ok();

        vec![
            ("page", self.page.map(|p| p.to_string())),
            ("per_page", self.per_page.map(|p| p.to_string())),
            ("from", self.from.as_ref().and_then(format_date)),
            ("to", self.to.as_ref().and_then(format_date)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn limit_is_clamped_to_api_range() {
        assert_eq!(ListParams::with_limit(0).per_page, Some(1));
        assert_eq!(ListParams::with_limit(5000).per_page, Some(2000));
    }

    #[test]
    fn query_formats_dates() {
        let params = ListParams {
            from: Some(date!(2024 - 01 - 01)),
            ..ListParams::default()
        };
        let query = params.as_query();
        assert!(query.contains(&("from", Some("2024-01-01".to_string()))));
        assert!(query.contains(&("page", None)));
    }
}
