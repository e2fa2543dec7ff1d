use crate::domains::collector::PostStats;
use crate::kernel::{Cell, RowFields, SheetRow};

/// `postDate` column format (DD.MM.YY).
pub const SHEET_DATE_FORMAT: &str = "%d.%m.%y";

/// Preview cell marking the results sheet as "report in progress".
pub const PLACEHOLDER_PREVIEW: &str = "постики";

/// Row kept in the results sheet outside the reporting window.
pub fn placeholder_row() -> RowFields {
    RowFields {
        post_preview: Some(Cell::from(PLACEHOLDER_PREVIEW)),
        post_url: Some(Cell::from("крутятся")),
        post_date: Some(Cell::from("просмотры")),
        shares_per_view: Some(Cell::from("мутятся")),
        reactions_per_view: Some(Cell::from("🤙🤙🤙")),
    }
}

pub fn is_placeholder(row: &SheetRow) -> bool {
    matches!(&row.fields.post_preview, Some(Cell::Text(text)) if text == PLACEHOLDER_PREVIEW)
}

/// Every column of a post row.
pub fn full_row(stats: &PostStats) -> RowFields {
    RowFields {
        post_preview: Some(Cell::from(stats.text.as_str())),
        post_url: Some(Cell::from(stats.link.as_str())),
        post_date: Some(Cell::from(stats.date.format(SHEET_DATE_FORMAT).to_string())),
        ..metrics_row(stats)
    }
}

/// Only the two ratio columns.
pub fn metrics_row(stats: &PostStats) -> RowFields {
    RowFields {
        shares_per_view: Some(Cell::from(stats.shares_per_view)),
        reactions_per_view: Some(Cell::from(stats.reactions_per_view)),
        ..Default::default()
    }
}

/// The row's `postUrl`, if the cell is filled.
pub fn row_link(row: &SheetRow) -> Option<String> {
    row.fields
        .post_url
        .as_ref()
        .map(ToString::to_string)
        .filter(|link| !link.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn stats() -> PostStats {
        PostStats {
            link: "t.me/kleymedia/42".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 5)
                .unwrap()
                .and_hms_opt(18, 30, 0)
                .unwrap(),
            text: "Hello world...".to_string(),
            shares_per_view: 0.42,
            reactions_per_view: 3.1,
        }
    }

    #[test]
    fn test_full_row_formats_date() {
        let row = full_row(&stats());

        assert_eq!(row.post_date, Some(Cell::from("05.03.24")));
        assert_eq!(row.post_url, Some(Cell::from("t.me/kleymedia/42")));
        assert_eq!(row.shares_per_view, Some(Cell::Number(0.42)));
    }

    #[test]
    fn test_metrics_row_leaves_other_columns_unset() {
        let row = metrics_row(&stats());

        assert!(row.post_preview.is_none());
        assert!(row.post_url.is_none());
        assert!(row.post_date.is_none());
        assert_eq!(row.reactions_per_view, Some(Cell::Number(3.1)));
    }

    #[test]
    fn test_placeholder_detection() {
        let placeholder = SheetRow {
            id: 2,
            fields: placeholder_row(),
        };
        let real = SheetRow {
            id: 2,
            fields: full_row(&stats()),
        };

        assert!(is_placeholder(&placeholder));
        assert!(!is_placeholder(&real));
        assert_eq!(row_link(&real).as_deref(), Some("t.me/kleymedia/42"));
    }
}
