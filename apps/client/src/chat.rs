//! Canned career-guide chat. Replies come from a fixed keyword table; there is
//! no model and no network call behind it.

pub const GREETING: &str = "Hello! I'm your AI career guide. I can help you navigate your learning \
journey, prepare for interviews, and make informed career decisions. What would you like to \
explore today?";

pub const PROMPT_CHIPS: [&str; 6] = [
    "Guide me step by step",
    "What should I learn next?",
    "Is this career right for me?",
    "Compare two roles",
    "Prep me for tomorrow",
    "Explain a concept",
];

pub const INTERVIEW_RESPONSE: &str = "Great initiative on preparing ahead! Here's a quick prep plan:

Today:
• Review common questions for your target role
• Practice 2-3 behavioral questions (STAR method)
• Research the company

Night before:
• Get 7-8 hours of sleep
• Prepare your outfit
• Review your resume

Morning of:
• Light breakfast
• Arrive 10-15 minutes early
• Take deep breaths and stay calm

Want me to quiz you on some practice questions?";

pub const DEFAULT_RESPONSE: &str = "That's a great question! I'm here to help you navigate your career \
journey. Here are some ways I can assist:

• Create personalized learning roadmaps
• Help prepare for interviews
• Compare different career paths
• Explain complex concepts
• Provide study recommendations

What would you like to explore first?";

struct Rule {
    keywords: &'static [&'static str],
    response: &'static str,
}

// First match wins, so the interview rule stays at the top.
const RULES: &[Rule] = &[
    Rule {
        keywords: &["interview", "prep", "tomorrow"],
        response: INTERVIEW_RESPONSE,
    },
    Rule {
        keywords: &["learn", "next"],
        response: "Based on your current progress, I'd recommend focusing on these areas:

1. Strengthen fundamentals - Make sure you have a solid foundation in core concepts
2. Build projects - Apply what you learn through hands-on practice
3. Practice interviews - Use our interview prep section to build confidence

Would you like me to create a personalized learning plan for you?",
    },
    Rule {
        keywords: &["career", "right"],
        response: "Choosing the right career path is a significant decision. Here are some questions to consider:

• What activities make you lose track of time?
• What problems do you enjoy solving?
• Where do you see yourself in 5 years?

Let's explore your interests together. Tell me about a project or task you've really enjoyed working on.",
    },
    Rule {
        keywords: &["compare", "vs"],
        response: "I'd be happy to help you compare different career paths! To give you the most relevant comparison, please tell me:

1. Which two roles are you considering?
2. What aspects are most important to you (salary, growth, work-life balance)?

This will help me provide a detailed comparison tailored to your priorities.",
    },
    Rule {
        keywords: &["explain", "concept"],
        response: "I'd be happy to explain any concept! Just tell me:

• What topic you'd like to understand better
• Your current level of understanding
• Any specific aspects you're confused about

I'll break it down in a way that makes sense for your background.",
    },
    Rule {
        keywords: &["step", "guide"],
        response: "I'll guide you step by step! First, let's understand your current situation:

1. What's your goal? (e.g., new job, skill development, career change)
2. What's your timeline? (weeks, months, or just exploring)
3. What's your current experience level?

Once I understand these, I can create a personalized roadmap for you.",
    },
];

/// Case-insensitive; any keyword appearing anywhere in the input fires its rule.
pub fn respond(input: &str) -> &'static str {
    let lowered = input.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lowered.contains(k)))
        .map_or(DEFAULT_RESPONSE, |rule| rule.response)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Assistant,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub text: String,
}

/// The visible transcript. It is the only context kept between turns.
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage {
                speaker: Speaker::Assistant,
                text: GREETING.to_string(),
            }],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn chips(&self) -> &'static [&'static str] {
        &PROMPT_CHIPS
    }

    /// Appends the user's message and the canned reply. Blank input is ignored.
    pub fn submit(&mut self, input: &str) -> Option<&'static str> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }
        let reply = respond(text);
        self.messages.push(ChatMessage {
            speaker: Speaker::User,
            text: text.to_string(),
        });
        self.messages.push(ChatMessage {
            speaker: Speaker::Assistant,
            text: reply.to_string(),
        });
        Some(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interview_always_wins() {
        assert_eq!(respond("interview"), INTERVIEW_RESPONSE);
        assert_eq!(respond("What should I learn before my INTERVIEW?"), INTERVIEW_RESPONSE);
        assert_eq!(respond("compare careers for an interview next week"), INTERVIEW_RESPONSE);
    }

    #[test]
    fn test_no_keyword_gets_default() {
        assert_eq!(respond("hello there"), DEFAULT_RESPONSE);
        assert_eq!(respond(""), DEFAULT_RESPONSE);
    }

    #[test]
    fn test_every_chip_has_a_specific_reply() {
        for chip in PROMPT_CHIPS {
            assert_ne!(respond(chip), DEFAULT_RESPONSE, "chip {chip:?} fell through");
        }
    }

    #[test]
    fn test_keywords_match_inside_words() {
        assert_eq!(respond("rust vs go"), RULES[3].response);
        assert_eq!(respond("frontend devs or backend?"), RULES[3].response);
        assert_eq!(respond("Explaining closures"), RULES[4].response);
    }

    #[test]
    fn test_interview_reply_keeps_full_checklist() {
        for line in ["• Prepare your outfit", "• Light breakfast", "• Research the company"] {
            assert!(INTERVIEW_RESPONSE.contains(line), "missing {line:?}");
        }
        assert!(RULES[1].response.starts_with("Based on your current progress"));
        assert!(!RULES.iter().any(|r| r.response.contains("**")));
    }

    #[test]
    fn test_session_ignores_blank_and_trims() {
        let mut session = ChatSession::new();
        assert_eq!(session.messages().len(), 1);
        assert!(session.submit("   ").is_none());
        assert_eq!(session.messages().len(), 1);

        session.submit("  prep me  ").unwrap();
        let messages = session.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].text, "prep me");
        assert_eq!(messages[1].speaker, Speaker::User);
        assert_eq!(messages[2].text, INTERVIEW_RESPONSE);
    }
}
