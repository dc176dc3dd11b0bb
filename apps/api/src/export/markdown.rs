use crate::export::outline::{self, Block};
use crate::export::ReportDocument;

pub fn render(document: &ReportDocument<'_>) -> String {
    let mut md = String::new();
    let mut previous_was_list = false;

    for block in outline::build(document) {
        let is_list = matches!(block, Block::Bullet { .. } | Block::Numbered { .. });
        if previous_was_list && !is_list {
            md.push('\n');
        }
        match block {
            Block::Title { text } => md.push_str(&format!("# {text}\n\n")),
            Block::Heading { text } => md.push_str(&format!("## {text}\n\n")),
            Block::Subheading { text } => md.push_str(&format!("### {text}\n\n")),
            Block::Field { label, value } => md.push_str(&format!("**{label}:** {value}  \n")),
            Block::Paragraph { text } => md.push_str(&format!("{text}\n\n")),
            Block::Bullet { text } => md.push_str(&format!("- {text}\n")),
            Block::Numbered { index, text } => md.push_str(&format!("{index}. {text}\n")),
        }
        previous_was_list = is_list;
    }

    md.trim_end().to_string() + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::testing::Fixture;
    use crate::locale::Language;

    #[test]
    fn test_markdown_has_headings_and_lists() {
        let fixture = Fixture::new(Language::En);
        let md = render(&fixture.document(Language::En));

        assert!(md.starts_with("# Your Personalized Leadership Assessment Report\n"));
        assert!(md.contains("**Name:** Amina"));
        assert!(md.contains("## Leadership Pillars\n"));
        assert!(md.contains("1. Run a monthly strategy review.\n"));
        assert!(md.contains("- Map key stakeholders\n"));
        assert!(md.ends_with('\n'));
    }

    #[test]
    fn test_arabic_markdown_uses_arabic_labels() {
        let fixture = Fixture::new(Language::Ar);
        let md = render(&fixture.document(Language::Ar));
        assert!(md.contains("# تقرير تقييم القيادة الشخصي"));
        assert!(md.contains("**الاسم:** Amina"));
    }
}
