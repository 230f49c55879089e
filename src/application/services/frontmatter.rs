use chrono::NaiveDate;

/// Blog frontmatter block placed ahead of a converted document.
pub fn render_frontmatter(title: &str, publish_date: NaiveDate) -> String {
    format!(
        "---\ntitle: '{}'\npublishDate: {}\ndescription: ''\ntags: []\nlanguage: 'English'\n---\n\n",
        title.replace('\'', "''"),
        publish_date.format("%Y-%m-%d"),
    )
}

pub fn with_frontmatter(title: &str, publish_date: NaiveDate, document: &str) -> String {
    let mut rendered = render_frontmatter(title, publish_date);
    rendered.push_str(document);
    rendered
}
