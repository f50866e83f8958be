use crate::enums::language::Language;

/// Builds the fixed review prompt embedding the language name and the full
/// source text.
pub fn build_review_prompt(language: Language, code: &str) -> String {
    format!(
        r#"You are a senior software engineer performing a professional code review of the following {} code:
- identify potential bugs, security issues and performance problems;
- suggest concrete improvements;
- where possible, provide the corrected code directly (output only the complete corrected code);
--------------------
{}
"#,
        language.name(),
        code
    )
}
