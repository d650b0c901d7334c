//! Responder - keyword based reply selection
//!
//! Rules are scanned in declared order and the first enabled rule whose
//! trigger occurs in the normalized text wins. Overlapping triggers are
//! expected ("hola, quiero una cita"), so the table stays an ordered list.

use tracing::info;

use crate::domain::entities::ReplyRule;

/// Reply used when no rule matches
pub const DEFAULT_REPLY: &str = "🤖 Gracias por tu mensaje. En breve alguien de nuestro equipo te contactará.\n\nPuedes escribir \"ayuda\" para ver las opciones disponibles.";

/// Selects a canned reply for inbound text
#[derive(Debug, Clone)]
pub struct Responder {
    rules: Vec<ReplyRule>,
    default_reply: String,
}

impl Responder {
    /// Create a responder from an ordered rule table
    pub fn new(rules: Vec<ReplyRule>, default_reply: impl Into<String>) -> Self {
        Self {
            rules,
            default_reply: default_reply.into(),
        }
    }

    /// The built-in rule table
    pub fn default_rules() -> Vec<ReplyRule> {
        vec![
            ReplyRule::new(
                "hola",
                "¡Hola! 👋 Gracias por contactarnos. ¿En qué podemos ayudarte?",
            ),
            ReplyRule::new(
                "cita",
                "📅 Para agendar una cita, puedes llamarnos al (57) 300 123 4567 o escribenos tu disponibilidad.",
            ),
            ReplyRule::new(
                "horarios",
                "🕐 Nuestros horarios de atención son:\nLunes a Viernes: 8:00 AM - 6:00 PM\nSábados: 9:00 AM - 2:00 PM",
            ),
            ReplyRule::new(
                "ayuda",
                "🆘 Estamos aquí para ayudarte. Puedes preguntarnos sobre:\n• Citas\n• Horarios\n• Servicios\n• Información general",
            ),
        ]
    }

    pub fn rules(&self) -> &[ReplyRule] {
        &self.rules
    }

    /// Lower-case and trim inbound text
    pub fn normalize(text: &str) -> String {
        text.trim().to_lowercase()
    }

    /// Pick the reply for a message body. Absent text behaves like an empty string.
    pub fn select(&self, text: Option<&str>) -> &str {
        let normalized = Self::normalize(text.unwrap_or_default());

        match self.rules.iter().find(|rule| rule.matches(&normalized)) {
            Some(rule) => {
                info!(trigger = %rule.trigger, "✅ Reply trigger matched");
                &rule.response
            }
            None => {
                info!("🔄 No trigger matched, using default reply");
                &self.default_reply
            }
        }
    }
}

impl Default for Responder {
    fn default() -> Self {
        Self::new(Self::default_rules(), DEFAULT_REPLY)
    }
}
