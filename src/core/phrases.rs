//! Constant lookup tables for classification and shaping
//!
//! Every ordered table is scanned front to back and the first match wins,
//! so entry order is part of the behavior.

use crate::types::Structure;

// =============================================================================
// TOPICS
// =============================================================================

/// Topic label → keywords. Scanned in order; no match means `general`.
pub const TOPIC_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "business",
        &[
            "bisnis", "usaha", "jualan", "dagang", "customer", "pelanggan", "marketing",
            "startup", "profit", "untung", "modal", "investasi", "keuangan", "cash flow",
            "revenue", "omzet", "perusahaan", "business",
        ],
    ),
    (
        "technology",
        &[
            "teknologi", "ai", "coding", "program", "software", "aplikasi", "komputer",
            "internet", "digital", "robot", "data", "website", "gadget", "tech stack",
            "technology",
        ],
    ),
    (
        "learning",
        &[
            "belajar", "kursus", "sekolah", "kuliah", "skill", "ilmu", "buku", "latihan",
            "pelajaran", "tutorial", "pendidikan", "learn", "study",
        ],
    ),
    (
        "personal",
        &[
            "perasaan", "keluarga", "teman", "sahabat", "pacar", "hubungan", "kesehatan",
            "stres", "capek", "bingung", "pribadi", "hidupku", "aku merasa", "saya merasa",
        ],
    ),
    (
        "general",
        &["umum", "dunia", "berita", "cuaca", "film", "musik", "hobi", "olahraga"],
    ),
];

/// Keywords for a topic label, empty for unmapped labels
pub fn topic_keywords(topic: &str) -> &'static [&'static str] {
    TOPIC_KEYWORDS
        .iter()
        .find(|(label, _)| *label == topic)
        .map(|(_, keywords)| *keywords)
        .unwrap_or(&[])
}

// =============================================================================
// SENTIMENT
// =============================================================================

/// Sentiment word lists, tested in this order: positive, negative, curious, excited
pub const POSITIVE_WORDS: &[&str] = &[
    "bagus", "senang", "suka", "keren", "hebat", "setuju", "bahagia", "terima kasih",
    "makasih", "good", "great", "nice", "happy",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "buruk", "sedih", "kecewa", "jelek", "susah", "gagal", "benci", "marah", "kesal",
    "takut", "khawatir", "masalah", "bad", "sad",
];

pub const CURIOUS_WORDS: &[&str] = &[
    "penasaran", "apakah", "apa", "bagaimana", "gimana", "kenapa", "mengapa", "kok",
    "ingin tahu", "pengen tahu", "why", "how", "wonder",
];

pub const EXCITED_WORDS: &[&str] = &[
    "wow", "wah", "gila", "luar biasa", "amazing", "awesome", "seru", "asik", "asyik", "!!",
];

// =============================================================================
// TRANSITIONS
// =============================================================================

/// (from, to) topic pairs with a canned bridge phrase
pub const TOPIC_TRANSITIONS: &[((&str, &str), &str)] = &[
    (
        ("business", "technology"),
        "Nyambung dari soal bisnis tadi, teknologi memang jadi penggerak utamanya. ",
    ),
    (
        ("technology", "business"),
        "Dari sisi teknologi tadi, sekarang kita lihat dari kacamata bisnisnya ya. ",
    ),
    (("business", "learning"), "Ngomongin bisnis memang nggak lepas dari terus belajar. "),
    (
        ("learning", "business"),
        "Ilmu yang dipelajari paling terasa manfaatnya waktu dipakai di bisnis. ",
    ),
    (
        ("technology", "learning"),
        "Teknologi berubah cepat, jadi wajar kalau kita bahas cara belajarnya. ",
    ),
    (
        ("learning", "technology"),
        "Belajar sekarang banyak dibantu teknologi, jadi pas banget kita bahas ini. ",
    ),
    (("personal", "business"), "Dari hal pribadi, kita geser sedikit ke urusan bisnis ya. "),
    (("personal", "learning"), "Pengalaman pribadi sering jadi bahan belajar paling berharga. "),
];

/// Bridge phrase for a topic pair, if one is mapped
pub fn transition_phrase(from: &str, to: &str) -> Option<&'static str> {
    TOPIC_TRANSITIONS
        .iter()
        .find(|((f, t), _)| *f == from && *t == to)
        .map(|(_, phrase)| *phrase)
}

/// Generic bridge for unmapped pairs
pub fn generic_transition(to: &str) -> String {
    format!("Oke, kita beralih ke topik {} ya. ", to)
}

// =============================================================================
// SHAPING
// =============================================================================

/// Category of opener used for personal expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpressionCategory {
    Agreeing,
    Thinking,
    Opening,
}

pub const AGREEING_EXPRESSIONS: &[&str] = &[
    "Setuju banget, ",
    "Bener juga, ",
    "Iya, aku juga mikir gitu, ",
];

pub const THINKING_EXPRESSIONS: &[&str] = &[
    "Hmm, ",
    "Kalau dipikir-pikir, ",
    "Menurutku, ",
];

pub const OPENING_EXPRESSIONS: &[&str] = &[
    "Nah, ",
    "Jadi gini, ",
    "Oke, ",
];

pub fn expressions(category: ExpressionCategory) -> &'static [&'static str] {
    match category {
        ExpressionCategory::Agreeing => AGREEING_EXPRESSIONS,
        ExpressionCategory::Thinking => THINKING_EXPRESSIONS,
        ExpressionCategory::Opening => OPENING_EXPRESSIONS,
    }
}

pub const MEDIUM_TRANSITIONS: &[&str] = &[
    "Hmm, menarik nih. ",
    "Coba aku pikirin sebentar. ",
    "Kalau dari sudut pandangku, begini. ",
];

pub const DETAILED_TRANSITIONS: &[&str] = &[
    "Oke, ini topik yang cukup dalam, jadi aku jelasin pelan-pelan. ",
    "Wah, banyak yang bisa dibahas di sini. Kita urai satu per satu ya. ",
    "Hmm, ini menarik dan berlapis. Aku bahas secara runtut. ",
];

/// Transition phrases keyed by reply structure; short replies get none
pub fn structure_transitions(structure: Structure) -> &'static [&'static str] {
    match structure {
        Structure::Short => &[],
        Structure::Medium => MEDIUM_TRANSITIONS,
        Structure::Detailed => DETAILED_TRANSITIONS,
    }
}

/// Topic label → follow-up questions
pub const FOLLOW_UP_QUESTIONS: &[(&str, &[&str])] = &[
    (
        "business",
        &[
            "Bisnis kamu sekarang bergerak di bidang apa?",
            "Tantangan terbesar di bisnismu saat ini apa?",
            "Kamu lebih fokus ke pertumbuhan atau stabilitas dulu?",
        ],
    ),
    (
        "technology",
        &[
            "Kamu lagi eksplor teknologi apa sekarang?",
            "Menurutmu teknologi mana yang paling berdampak beberapa tahun ke depan?",
            "Tim kamu biasanya pakai tech stack apa?",
        ],
    ),
    (
        "learning",
        &[
            "Lagi belajar apa akhir-akhir ini?",
            "Kamu lebih suka belajar lewat praktik atau teori?",
            "Ada skill yang pengen banget kamu kuasai tahun ini?",
        ],
    ),
    (
        "personal",
        &[
            "Gimana perasaan kamu soal itu sekarang?",
            "Ada yang bisa aku bantu supaya lebih ringan?",
        ],
    ),
];

/// Used when the topic has no mapped questions
pub const GENERIC_QUESTIONS: &[&str] = &[
    "Gimana menurutmu?",
    "Ada yang mau kamu tambahkan?",
    "Kamu sendiri punya pengalaman soal ini?",
];

/// Follow-up questions for a topic, falling back to the generic table
pub fn follow_up_questions(topic: &str) -> &'static [&'static str] {
    FOLLOW_UP_QUESTIONS
        .iter()
        .find(|(label, _)| *label == topic)
        .map(|(_, questions)| *questions)
        .unwrap_or(GENERIC_QUESTIONS)
}

// =============================================================================
// QUICK RESPONSES
// =============================================================================

pub const QUICK_GREETING: &[&str] = &[
    "Hai! Senang bisa ngobrol sama kamu. Ada apa nih?",
    "Halo! Mau bahas apa hari ini?",
];

pub const QUICK_CASUAL: &[&str] = &[
    "Oke, siap!",
    "Sip, lanjut!",
    "Hehe, iya.",
];

pub const QUICK_POSITIVE: &[&str] = &[
    "Senang dengarnya!",
    "Mantap, ikut senang!",
];

pub const QUICK_FALLBACK: &[&str] = &[
    "Menarik! Cerita lebih lanjut dong.",
    "Hmm, maksudnya gimana tuh?",
];
