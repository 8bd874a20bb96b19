//! # Keyword Classifier
//!
//! Rule-based classification over two fixed keyword sets. Used directly
//! when no remote model is configured and as the per-request fallback
//! when the remote model fails.
//!
//! ## Decision rule
//!
//! Each keyword counts once if it occurs anywhere in the lowercased text
//! (substring match, so multi-word phrases like `"bom dia"` work). The
//! category with more hits wins; a tie, including no hits at all, resolves
//! to [`Category::Productive`] so that nothing actionable is silently
//! dropped. Scores are the hit counts normalised by `max(total, 1)`.

use crate::category::{Category, Classification, Scores};

/// Keywords indicating the sender expects action.
const PRODUCTIVE_KEYWORDS: &[&str] = &[
    "status",
    "andamento",
    "atualização",
    "suporte",
    "erro",
    "problema",
    "acesso",
    "pedido",
    "solicitação",
    "requisicao",
    "requerimento",
    "caso",
    "chamado",
    "contrato",
    "fatura",
    "pagamento",
    "anexo",
    "documento",
    "prazo",
    "urgente",
    "bloqueio",
    "dúvida",
];

/// Keywords typical of courtesy messages.
const UNPRODUCTIVE_KEYWORDS: &[&str] = &[
    "obrigado",
    "agradeço",
    "feliz",
    "parabéns",
    "bom dia",
    "boa tarde",
    "boa noite",
    "atenciosamente",
    "saudações",
    "boas festas",
    "natal",
    "ano novo",
    "congratulações",
];

/// Classifier that counts category keywords in the email text.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    /// Create a keyword classifier.
    pub fn new() -> Self {
        Self
    }

    /// Classify `text`. Blank text is [`Category::Unproductive`] with full
    /// confidence.
    pub fn classify(&self, text: &str) -> Classification {
        let text = text.trim();
        if text.is_empty() {
            return Classification {
                category: Category::Unproductive,
                scores: Scores::new(0.0, 1.0),
            };
        }

        let lowered = text.to_lowercase();
        let productive_hits = count_hits(&lowered, PRODUCTIVE_KEYWORDS);
        let unproductive_hits = count_hits(&lowered, UNPRODUCTIVE_KEYWORDS);

        let category = if unproductive_hits > productive_hits {
            Category::Unproductive
        } else {
            Category::Productive
        };

        let total = (productive_hits + unproductive_hits).max(1) as f64;
        tracing::debug!(productive_hits, unproductive_hits, %category, "keyword classification");

        Classification {
            category,
            scores: Scores::new(
                productive_hits as f64 / total,
                unproductive_hits as f64 / total,
            ),
        }
    }
}

fn count_hits(lowered: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|kw| lowered.contains(*kw)).count()
}
