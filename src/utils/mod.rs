use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;

fn word_regex() -> &'static Regex {
    static WORDS: OnceLock<Regex> = OnceLock::new();
    WORDS.get_or_init(|| Regex::new(r"\w+").expect("valid regex"))
}

/// Keeps the word-character runs of `title`, joined with underscores.
pub fn sanitize_filename(title: &str) -> String {
    word_regex()
        .find_iter(title)
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join("_")
}

/// `<title>.<ext>`, falling back to the video id when the title has no
/// word characters at all.
pub fn generate_output_filename(title: &str, video_id: u64, ext: &str) -> PathBuf {
    let stem = match sanitize_filename(title) {
        stem if stem.is_empty() => video_id.to_string(),
        stem => stem,
    };
    PathBuf::from(format!("{}.{}", stem, ext))
}

pub fn format_progress(downloaded: u64, total: u64) -> String {
    let percent = if total == 0 {
        100.0
    } else {
        downloaded as f64 / total as f64 * 100.0
    };
    format!("Progress: {}/{} bytes ({:.2}%)", downloaded, total, percent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Show Name: Part 1!"), "Show_Name_Part_1");
        assert_eq!(sanitize_filename("hello/world"), "hello_world");
        assert_eq!(sanitize_filename("  spaced   out  "), "spaced_out");
        assert_eq!(sanitize_filename("snake_case stays"), "snake_case_stays");
    }

    #[test]
    fn test_sanitize_keeps_unicode_letters() {
        assert_eq!(sanitize_filename("Příběhy včelích medvídků"), "Příběhy_včelích_medvídků");
    }

    #[test]
    fn test_output_filename() {
        assert_eq!(
            generate_output_filename("Show Name: Part 1!", 12345, "mp4"),
            PathBuf::from("Show_Name_Part_1.mp4")
        );
        assert_eq!(
            generate_output_filename("Show Name: Part 1!", 12345, "srt"),
            PathBuf::from("Show_Name_Part_1.srt")
        );
        assert_eq!(generate_output_filename("?!", 12345, "mp4"), PathBuf::from("12345.mp4"));
    }

    #[test]
    fn test_format_progress() {
        assert_eq!(format_progress(0, 3), "Progress: 0/3 bytes (0.00%)");
        assert_eq!(format_progress(1, 3), "Progress: 1/3 bytes (33.33%)");
        assert_eq!(format_progress(1048576, 1048576), "Progress: 1048576/1048576 bytes (100.00%)");
        assert_eq!(format_progress(0, 0), "Progress: 0/0 bytes (100.00%)");
    }
}
