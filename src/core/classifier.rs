//! Discourse Classifier: intent, topic, sentiment, complexity and flow
//!
//! Every dimension is a fixed-order, first-match-wins scan with an explicit
//! default, so classification never fails and is a pure function of
//! (utterance, previous topic).

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::core::phrases::{
    topic_keywords, CURIOUS_WORDS, EXCITED_WORDS, NEGATIVE_WORDS, POSITIVE_WORDS, TOPIC_KEYWORDS,
};
use crate::types::{Complexity, ConversationFlow, DiscourseSignal, Intent, Sentiment};
use crate::{COMPLEXITY_COMPLEX_CHARS, COMPLEXITY_MODERATE_CHARS, DEFAULT_TOPIC};

lazy_static! {
    // Interrogative at the start of the utterance (a `?` anywhere also counts)
    static ref RE_QUESTION_START: Regex = Regex::new(
        r"(?i)^\s*(apa|apakah|bagaimana|gimana|kenapa|mengapa|kapan|dimana|di mana|kemana|siapa|berapa|benarkah|bisakah|what|why|how|when|where|who|which)\b"
    ).expect("valid question regex");

    // First-person opinion
    static ref RE_OPINION: Regex = Regex::new(
        r"(?i)\b(menurut\s*(ku|aku|saya|gue|gw)|aku\s+(rasa|pikir|kira)|saya\s+(rasa|pikir|kira)|kurasa|kupikir|i\s+think|i\s+believe|in\s+my\s+opinion|imo)\b"
    ).expect("valid opinion regex");

    // Polite request at the start of the utterance
    static ref RE_REQUEST_START: Regex = Regex::new(
        r"(?i)^\s*(tolong|bantu|bantuin|minta|mohon|coba|please|pls|help)\b"
    ).expect("valid request regex");

    static ref RE_GREETING: Regex = Regex::new(
        r"(?i)\b(halo|hallo|hai|hi|hey|hello|selamat\s+(pagi|siang|sore|malam)|assalamualaikum)\b"
    ).expect("valid greeting regex");

    // Acknowledgment / backchannel
    static ref RE_ACKNOWLEDGMENT: Regex = Regex::new(
        r"(?i)\b(ok|oke|okay|okey|sip|siap|iya|ya|yoi|yup|sure|thanks|thx|makasih|terima\s+kasih|mantap|wkwk\w*|haha\w*|hehe\w*)\b"
    ).expect("valid acknowledgment regex");

    static ref RE_CLOSING: Regex = Regex::new(
        r"(?i)\b(bye|dadah|sampai\s+jumpa|selamat\s+tinggal|see\s+you|udah\s+dulu|sudah\s+dulu|good\s+night|selamat\s+tidur)\b"
    ).expect("valid closing regex");

    // Asks the conversation to keep going
    static ref RE_CONTINUATION: Regex = Regex::new(
        r"(?i)\b(lanjut|lanjutkan|terus|trus|selanjutnya|lalu|jelasin|jelaskan|ceritain|ceritakan|contohnya|misalnya|continue|tell\s+me\s+more)\b"
    ).expect("valid continuation regex");
}

/// Keywords this short are only matched as whole words ("ai" must not hit "sampai")
const WHOLE_WORD_MAX_LEN: usize = 3;

/// Discourse classifier
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscourseClassifier;

impl DiscourseClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify one utterance given the topic of the previous turn, if any
    pub fn classify(&self, utterance: &str, previous_topic: Option<&str>) -> DiscourseSignal {
        let lowered = utterance.to_lowercase();

        let intent = self.detect_intent(utterance);
        let topic = self.detect_topic(&lowered);
        let sentiment = self.detect_sentiment(&lowered);
        let complexity = self.detect_complexity(utterance);
        let requires_follow_up = intent == Intent::Question
            || sentiment == Sentiment::Curious
            || RE_CONTINUATION.is_match(utterance);
        let conversation_flow = self.detect_flow(utterance, &lowered, intent, previous_topic);

        let signal = DiscourseSignal {
            intent,
            topic,
            sentiment,
            complexity,
            requires_follow_up,
            conversation_flow,
        };
        debug!(signal = %signal.summary(), "classified utterance");
        signal
    }

    pub fn detect_intent(&self, utterance: &str) -> Intent {
        if utterance.contains('?') || RE_QUESTION_START.is_match(utterance) {
            Intent::Question
        } else if RE_OPINION.is_match(utterance) {
            Intent::Opinion
        } else if RE_REQUEST_START.is_match(utterance) {
            Intent::Request
        } else if RE_GREETING.is_match(utterance) {
            Intent::Greeting
        } else if RE_ACKNOWLEDGMENT.is_match(utterance) {
            Intent::Casual
        } else {
            Intent::Statement
        }
    }

    /// Expects lower-cased text
    fn detect_topic(&self, lowered: &str) -> String {
        TOPIC_KEYWORDS
            .iter()
            .find(|(_, keywords)| contains_any(lowered, keywords))
            .map(|(label, _)| *label)
            .unwrap_or(DEFAULT_TOPIC)
            .to_string()
    }

    /// Expects lower-cased text
    fn detect_sentiment(&self, lowered: &str) -> Sentiment {
        let lists: [(&[&str], Sentiment); 4] = [
            (POSITIVE_WORDS, Sentiment::Positive),
            (NEGATIVE_WORDS, Sentiment::Negative),
            (CURIOUS_WORDS, Sentiment::Curious),
            (EXCITED_WORDS, Sentiment::Excited),
        ];
        lists
            .iter()
            .find(|(words, _)| contains_any(lowered, words))
            .map(|(_, sentiment)| *sentiment)
            .unwrap_or(Sentiment::Neutral)
    }

    /// Raw character length, untrimmed
    pub fn detect_complexity(&self, utterance: &str) -> Complexity {
        let length = utterance.chars().count();
        if length > COMPLEXITY_COMPLEX_CHARS {
            Complexity::Complex
        } else if length > COMPLEXITY_MODERATE_CHARS {
            Complexity::Moderate
        } else {
            Complexity::Simple
        }
    }

    fn detect_flow(
        &self,
        utterance: &str,
        lowered: &str,
        intent: Intent,
        previous_topic: Option<&str>,
    ) -> ConversationFlow {
        let previous = match previous_topic {
            Some(topic) if intent != Intent::Greeting => topic,
            _ => return ConversationFlow::Opening,
        };

        if RE_CLOSING.is_match(utterance) {
            ConversationFlow::Closing
        } else if !references_topic(lowered, previous) {
            ConversationFlow::TopicSwitch
        } else {
            ConversationFlow::Continuing
        }
    }
}

/// The utterance names the topic label or one of its keywords
fn references_topic(lowered: &str, topic: &str) -> bool {
    let label = topic.to_lowercase();
    contains_keyword(lowered, &label) || contains_any(lowered, topic_keywords(topic))
}

fn contains_any(lowered: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| contains_keyword(lowered, keyword))
}

/// Substring match; short alphanumeric keywords must stand as a whole word
fn contains_keyword(lowered: &str, keyword: &str) -> bool {
    if keyword.is_empty() {
        return false;
    }
    let short_word = keyword.chars().count() <= WHOLE_WORD_MAX_LEN
        && keyword.chars().all(char::is_alphanumeric);
    if !short_word {
        return lowered.contains(keyword);
    }

    lowered.match_indices(keyword).any(|(start, matched)| {
        let before = lowered[..start].chars().next_back();
        let after = lowered[start + matched.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn classify(text: &str) -> DiscourseSignal {
        DiscourseClassifier::new().classify(text, None)
    }

    #[test]
    fn test_empty_input_defaults() {
        let signal = classify("");
        assert_eq!(
            signal,
            DiscourseSignal {
                intent: Intent::Statement,
                topic: "general".to_string(),
                sentiment: Sentiment::Neutral,
                complexity: Complexity::Simple,
                requires_follow_up: false,
                conversation_flow: ConversationFlow::Opening,
            }
        );
    }

    #[test]
    fn test_question_by_mark_and_by_interrogative() {
        assert_eq!(classify("Ini beneran?").intent, Intent::Question);
        assert_eq!(classify("Bagaimana cara kerjanya").intent, Intent::Question);
        assert_eq!(classify("how does it work").intent, Intent::Question);
    }

    #[test]
    fn test_question_wins_over_opinion() {
        // Both markers present: fixed priority picks question
        assert_eq!(classify("Menurutku ini bagus, kamu setuju?").intent, Intent::Question);
    }

    #[test]
    fn test_opinion_request_greeting_casual() {
        assert_eq!(classify("Menurut saya ini langkah yang tepat").intent, Intent::Opinion);
        assert_eq!(classify("Tolong jelaskan soal modal usaha").intent, Intent::Request);
        assert_eq!(classify("Halo MIORA").intent, Intent::Greeting);
        assert_eq!(classify("oke sip").intent, Intent::Casual);
        assert_eq!(classify("Aku baru pulang kerja").intent, Intent::Statement);
    }

    #[test]
    fn test_request_marker_must_start_utterance() {
        assert_eq!(classify("Aku minta waktu sebentar").intent, Intent::Statement);
    }

    #[test]
    fn test_topic_first_match_wins() {
        // business is scanned before technology
        assert_eq!(classify("Pakai AI buat bisnis").topic, "business");
        assert_eq!(classify("Apakah AI bisa menggantikan manusia?").topic, "technology");
        assert_eq!(classify("Aku mau belajar gitar").topic, "learning");
        assert_eq!(classify("Lagi kangen keluarga").topic, "personal");
        assert_eq!(classify("Langitnya cerah").topic, "general");
    }

    #[test]
    fn test_short_keyword_needs_word_boundary() {
        // "sampai" and "pakai" contain "ai" but are not about AI
        assert_eq!(classify("Sampai nanti, pakai jaket ya").topic, "general");
    }

    #[test]
    fn test_sentiment_order() {
        assert_eq!(classify("Filmnya bagus tapi sedih").sentiment, Sentiment::Positive);
        assert_eq!(classify("Hari ini buruk").sentiment, Sentiment::Negative);
        assert_eq!(classify("Aku penasaran").sentiment, Sentiment::Curious);
        assert_eq!(classify("Wow seru banget").sentiment, Sentiment::Excited);
        assert_eq!(classify("Aku di rumah").sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_complexity_thresholds() {
        let classifier = DiscourseClassifier::new();
        assert_eq!(classifier.detect_complexity(&"a".repeat(30)), Complexity::Simple);
        assert_eq!(classifier.detect_complexity(&"a".repeat(31)), Complexity::Moderate);
        assert_eq!(classifier.detect_complexity(&"a".repeat(100)), Complexity::Moderate);
        assert_eq!(classifier.detect_complexity(&"a".repeat(101)), Complexity::Complex);
    }

    #[test]
    fn test_complexity_counts_characters_not_bytes() {
        let classifier = DiscourseClassifier::new();
        // 20 two-byte characters = 40 bytes but only 20 chars
        assert_eq!(classifier.detect_complexity(&"é".repeat(20)), Complexity::Simple);
    }

    #[test]
    fn test_requires_follow_up() {
        assert!(classify("Apa kabar?").requires_follow_up);
        assert!(classify("Lanjut dong").requires_follow_up);
        assert!(!classify("Aku di rumah").requires_follow_up);
    }

    #[test]
    fn test_flow_opening_without_previous_topic() {
        assert_eq!(classify("Aku mau cerita").conversation_flow, ConversationFlow::Opening);
    }

    #[test]
    fn test_flow_greeting_is_opening_even_mid_conversation() {
        let signal = DiscourseClassifier::new().classify("Halo lagi", Some("business"));
        assert_eq!(signal.conversation_flow, ConversationFlow::Opening);
    }

    #[test]
    fn test_flow_closing() {
        let signal = DiscourseClassifier::new().classify("Udah dulu ya, bye", Some("business"));
        assert_eq!(signal.conversation_flow, ConversationFlow::Closing);
    }

    #[test]
    fn test_flow_continuing_and_switch() {
        let classifier = DiscourseClassifier::new();
        let continuing = classifier.classify("Terus soal modal usaha gimana", Some("business"));
        assert_eq!(continuing.conversation_flow, ConversationFlow::Continuing);

        let switched = classifier.classify("Aku mau belajar coding", Some("business"));
        assert_eq!(switched.conversation_flow, ConversationFlow::TopicSwitch);
    }

    #[test]
    fn test_flow_unmapped_previous_topic_by_label() {
        let classifier = DiscourseClassifier::new();
        let signal = classifier.classify("Astronomy itu seru", Some("astronomy"));
        assert_eq!(signal.conversation_flow, ConversationFlow::Continuing);
    }

    #[test]
    fn test_determinism() {
        let classifier = DiscourseClassifier::new();
        let text = "Menurutku belajar coding itu seru, tapi kadang susah juga.";
        let a = classifier.classify(text, Some("learning"));
        let b = classifier.classify(text, Some("learning"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_non_ascii_input() {
        let signal = classify("こんにちは 🌸");
        assert_eq!(signal.topic, "general");
        assert_eq!(signal.intent, Intent::Statement);
    }
}
