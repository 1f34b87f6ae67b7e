//! Integration tests for Slice 2 - Response shaping and the turn loop
//!
//! Tests the path: signal → ResponseShaper → ConversationSession → TurnReport

use discourse_engine::core::phrases::{
    follow_up_questions, DETAILED_TRANSITIONS, MEDIUM_TRANSITIONS, QUICK_CASUAL, QUICK_FALLBACK,
    QUICK_GREETING, QUICK_POSITIVE,
};
use discourse_engine::core::{
    estimate_duration_seconds, ConversationSession, DiscourseClassifier, ReplySource,
    ResponseShaper,
};
use discourse_engine::types::{
    Complexity, ConversationFlow, DiscourseSignal, Intent, ResponsePath, Sentiment, Tone,
};
use discourse_engine::{EngineConfig, EngineError};

const BUSINESS_DEFAULT: &str = "Untuk bisnis yang sustainable, kunci utamanya adalah memahami customer needs dan build sistem yang scalable.";

fn seeded(seed: u64) -> ConversationSession {
    ConversationSession::new(&EngineConfig {
        seed: Some(seed),
        ..EngineConfig::default()
    })
}

#[test]
fn test_example_scenario_shaping() {
    let signal = DiscourseClassifier::new().classify("Apakah AI bisa menggantikan manusia?", None);

    for seed in 0..20 {
        let mut shaper = ResponseShaper::seeded(seed);
        let response = shaper.optimize(BUSINESS_DEFAULT, &signal, None);

        assert!(
            MEDIUM_TRANSITIONS.iter().any(|t| response.content.starts_with(t)),
            "unexpected opener: {}",
            response.content
        );
        assert!(response.content.ends_with(BUSINESS_DEFAULT));
        assert_eq!(response.tone, Tone::Thoughtful);

        let question = response.follow_up_question.expect("question required");
        assert!(follow_up_questions("technology").contains(&question.as_str()));
    }
}

#[test]
fn test_example_scenario_through_session() {
    let mut session = seeded(11);
    let report = session.respond("Apakah AI bisa menggantikan manusia?").unwrap();

    assert_eq!(report.path, ResponsePath::Shaped);
    assert_eq!(report.signal.topic, "technology");
    let optimized = report.optimized.as_ref().unwrap();
    assert!(report.reply.starts_with(&optimized.content));
    assert!(report.reply.ends_with(optimized.follow_up_question.as_deref().unwrap()));
}

#[test]
fn test_complex_utterance_gets_detailed_framing() {
    let text = "Aku lagi bingung banget soal arah karier, antara lanjut kuliah S2 atau langsung kerja di perusahaan teknologi yang baru buka";
    let signal = DiscourseClassifier::new().classify(text, None);
    assert_eq!(signal.complexity, Complexity::Complex);

    let response = ResponseShaper::seeded(3).optimize("Dua-duanya valid.", &signal, None);
    assert!(DETAILED_TRANSITIONS.iter().any(|t| response.content.starts_with(t)));
}

#[test]
fn test_quick_response_is_never_empty() {
    let mut shaper = ResponseShaper::seeded(9);
    let combos = [
        (Intent::Greeting, Sentiment::Neutral, QUICK_GREETING),
        (Intent::Casual, Sentiment::Positive, QUICK_CASUAL),
        (Intent::Statement, Sentiment::Positive, QUICK_POSITIVE),
        (Intent::Statement, Sentiment::Negative, QUICK_FALLBACK),
        (Intent::Question, Sentiment::Excited, QUICK_FALLBACK),
    ];

    for (intent, sentiment, table) in combos {
        let signal = DiscourseSignal {
            intent,
            topic: "general".to_string(),
            sentiment,
            complexity: Complexity::Simple,
            requires_follow_up: false,
            conversation_flow: ConversationFlow::Opening,
        };
        let reply = shaper.create_quick_response(&signal);
        assert!(!reply.is_empty());
        assert!(table.contains(&reply.as_str()), "{} not in table", reply);
    }
}

#[test]
fn test_duration_scales_with_words() {
    assert_eq!(estimate_duration_seconds(""), 0);
    assert_eq!(estimate_duration_seconds("satu"), 1);
    assert_eq!(estimate_duration_seconds("satu dua tiga empat lima"), 3);

    let short = estimate_duration_seconds(&"kata ".repeat(10));
    let long = estimate_duration_seconds(&"kata ".repeat(40));
    assert!(long > short);
}

#[test]
fn test_session_conversation_end_to_end() {
    let mut session = seeded(21);
    let script = [
        "Halo",
        "Aku lagi mikirin modal usaha buat tahun depan",
        "Terus kalau pelanggan belum banyak gimana",
        "oke sip",
    ];

    let reports: Vec<_> = script.iter().map(|line| session.respond(line).unwrap()).collect();
    let paths: Vec<_> = reports.iter().map(|r| r.path).collect();
    assert_eq!(
        paths,
        vec![ResponsePath::Shaped, ResponsePath::Shaped, ResponsePath::Shaped, ResponsePath::Quick]
    );
    assert_eq!(reports[2].topic_depth, 2);

    let stats = session.stats();
    assert_eq!(stats.conversation_turns, 4);
    assert!(stats.active_topics.contains(&"business".to_string()));
    assert_eq!(session.state().topic_history.len(), 4);
}

#[test]
fn test_history_bound_through_session() {
    let mut session = ConversationSession::new(&EngineConfig {
        seed: Some(1),
        history_capacity: 3,
        ..EngineConfig::default()
    });
    for i in 0..6 {
        session.respond(&format!("cerita ke {}", i)).unwrap();
    }
    let inputs: Vec<_> = session
        .state()
        .topic_history
        .turns()
        .map(|t| t.user_input.clone())
        .collect();
    assert_eq!(inputs, vec!["cerita ke 3", "cerita ke 4", "cerita ke 5"]);
}

#[test]
fn test_custom_reply_source() {
    struct Fixed;
    impl ReplySource for Fixed {
        fn base_reply(&self, _intent: Intent, _topic: &str) -> String {
            "Jawaban tetap.".to_string()
        }
    }

    let mut session = ConversationSession::new(&EngineConfig {
        seed: Some(5),
        follow_up_probability: 0.0,
        ..EngineConfig::default()
    })
    .with_templates(Box::new(Fixed));

    let report = session.respond("Aku di rumah aja hari ini").unwrap();
    assert_eq!(report.reply, "Jawaban tetap.");
}

#[test]
fn test_blank_input_rejected() {
    let mut session = seeded(1);
    assert!(matches!(session.respond("\n\t "), Err(EngineError::EmptyUtterance)));
}
