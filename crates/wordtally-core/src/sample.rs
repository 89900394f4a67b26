//! Demonstration text shown when the page is opened with `?demo`.

/// Sample text injected into the editor in demo mode.
pub const SAMPLE_TEXT: &str = "Welcome to Word Counter! This is a sample text to demonstrate the functionality of our tool. \n\nStudents can use this tool to track their essay word counts and ensure they meet assignment requirements. Whether you're writing a 500-word reflection or a 5000-word research paper, our counter helps you stay on track.\n\nBloggers and content writers benefit from understanding their content length. Different platforms have different optimal lengths - LinkedIn articles perform well at 1500 words, while Twitter threads need to be concise.\n\nSEO professionals know that content length matters for rankings. Comprehensive articles between 1500-2500 words tend to perform better in search results. Use our tool to optimize your content for both users and search engines!";

/// Whether a URL query string (with or without the leading `?`) asks for
/// demo mode.
pub fn wants_demo(query: &str) -> bool {
    query
        .trim_start_matches('?')
        .split('&')
        .any(|pair| pair.split('=').next() == Some("demo"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::compute;

    #[test]
    fn test_wants_demo() {
        assert!(wants_demo("?demo"));
        assert!(wants_demo("demo=1"));
        assert!(wants_demo("?lang=en&demo"));
        assert!(!wants_demo(""));
        assert!(!wants_demo("?demonstration=1"));
    }

    #[test]
    fn test_sample_text_metrics() {
        let m = compute(SAMPLE_TEXT);
        assert_eq!(m.paragraph_count, 4);
        assert_eq!(m.sentence_count, 9);
        assert_eq!(m.reading_time_minutes, 1);
        assert_eq!(m.word_count, 116);
    }
}
