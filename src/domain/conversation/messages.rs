//! Fixed texts the bot sends outside of the guidance table.

/// Sent when a conversation is opened.
pub const WELCOME: &str = "Welcome to Visa Guide! I can help you understand when and how you \
may work in the US on a student visa. Ask me about on campus jobs, CPT or OPT.";

/// First prompt of a conversation.
pub const INTRO_PROMPT: &str =
    "What can I help you with today?\nSay something like \"Can I work on campus with an F1 visa?\"";

/// Prompt after a question has been answered.
pub const RESTART_PROMPT: &str = "What else can I do for you?";

/// Sent when the language understanding service could not be reached.
pub const CLASSIFIER_UNAVAILABLE: &str =
    "Sorry, I'm having trouble understanding requests right now. Please try again in a moment.";

/// Reply for an intent without a flow.
pub fn didnt_understand(intent: &str) -> String {
    format!(
        "Sorry, I didn't get that. Please try asking in a different way (intent was {})",
        intent
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn didnt_understand_names_the_intent() {
        let text = didnt_understand("GetWeather");
        assert!(text.starts_with("Sorry, I didn't get that."));
        assert!(text.contains("GetWeather"));
    }
}
