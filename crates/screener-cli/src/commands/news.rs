//! 최근 뉴스 (`news`).

use screener_core::NewsItem;

use super::section_title;

pub fn format_table(items: &[NewsItem]) -> String {
    let mut output = section_title("News");
    for item in items {
        output.push_str(&format!("{}  {}\n", item.published, item.title));
        if let Some(publisher) = &item.publisher {
            output.push_str(&format!("    {}\n", publisher));
        }
        if let Some(link) = &item.link {
            output.push_str(&format!("    {}\n", link));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_table() {
        let items = vec![NewsItem {
            published: "14/11/2023  22:13:20".to_string(),
            title: "S&P 500 hits record".to_string(),
            publisher: Some("Reuters".to_string()),
            link: None,
        }];

        let table = format_table(&items);
        assert!(table.contains("14/11/2023  22:13:20  S&P 500 hits record"));
        assert!(table.contains("    Reuters"));
    }
}
