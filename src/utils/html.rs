// src/utils/html.rs

/// Sanitizes authored passage and prompt HTML with ammonia's whitelist.
///
/// Formatting tags (<p>, <b>, <em>, tables) survive; <script>, <iframe>
/// and event-handler attributes are stripped along with their content.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}
