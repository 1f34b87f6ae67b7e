//! Base reply templates keyed by (intent, topic)

use crate::types::Intent;

/// Source of candidate replies before shaping
pub trait ReplySource: Send + Sync {
    fn base_reply(&self, intent: Intent, topic: &str) -> String;
}

/// Built-in Indonesian reply table
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultTemplates;

impl DefaultTemplates {
    pub fn new() -> Self {
        Self
    }
}

impl ReplySource for DefaultTemplates {
    fn base_reply(&self, intent: Intent, topic: &str) -> String {
        let reply = match (intent, topic) {
            (Intent::Question, "business") => {
                "Untuk bisnis yang sustainable, kunci utamanya adalah memahami customer needs dan build sistem yang scalable. Yang penting juga cash flow management yang baik."
            }
            (Intent::Question, "technology") => {
                "Teknologi berkembang sangat cepat. Yang terpenting adalah pilih tech stack yang sesuai dengan kebutuhan dan tim. Jangan ikut hype doang, tapi lihat long-term value-nya."
            }
            (Intent::Question, "learning") => {
                "Belajar yang efektif itu learning by doing. Teori penting, tapi praktik langsung lebih nempel. Konsistensi kecil tapi rutin lebih baik daripada belajar marathon sesekali."
            }
            (Intent::Question, _) => {
                "Pertanyaan yang menarik! Mari kita explore lebih dalam tentang hal ini."
            }
            (Intent::Opinion, _) => {
                "Interesting perspective! Aku setuju dengan beberapa poin yang kamu sampaikan. Pengalaman dan sudut pandang yang berbeda memang bikin diskusi jadi lebih kaya."
            }
            (Intent::Request, _) => {
                "Tentu, aku siap bantu! Mari kita breakdown masalahnya step by step biar lebih jelas solusinya."
            }
            _ => {
                "Menarik banget yang kamu sampaikan. Ada aspek lain yang pengen kita bahas lebih dalam?"
            }
        };
        reply.to_string()
    }
}
