//! Urgency annotation
//!
//! Wraps answers to crisis queries with an urgent banner and an
//! emergency-line instruction, regardless of which responder answered.

/// Crisis keywords, matched as substrings of the lowercased query
const CRISIS_KEYWORDS: &[&str] = &["lost", "stolen", "fraud", "emergency"];

const URGENT_BANNER: &str = "🚨 **URGENT**\n\n";
const EMERGENCY_INSTRUCTION: &str = "\n\n📞 **Please call 1-800-HELP immediately!**";

pub struct UrgencyAnnotator;

impl UrgencyAnnotator {
    pub fn is_urgent(query: &str) -> bool {
        let query = query.to_lowercase();
        CRISIS_KEYWORDS.iter().any(|kw| query.contains(*kw))
    }

    /// Wrap `answer` when `query` mentions a crisis keyword, otherwise return it unchanged
    pub fn annotate(query: &str, answer: &str) -> String {
        if Self::is_urgent(query) {
            format!("{}{}{}", URGENT_BANNER, answer, EMERGENCY_INSTRUCTION)
        } else {
            answer.to_string()
        }
    }
}
