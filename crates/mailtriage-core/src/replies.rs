//! # Canned Replies
//!
//! Predefined replies used when no language model is configured or the
//! model call fails. Two variants per category; one is picked at random so
//! repeated submissions do not always read identically.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::category::Category;

const PRODUCTIVE_REPLIES: &[&str] = &[
    "Olá, obrigado pelo contato! Estamos analisando sua solicitação e retornaremos em breve.",
    "Recebemos seu email e já estamos trabalhando na sua demanda. Entraremos em contato com atualizações.",
];

const UNPRODUCTIVE_REPLIES: &[&str] = &[
    "Obrigado pelo seu email! Tenha um ótimo dia!",
    "Agradecemos a mensagem. Estamos à disposição sempre que precisar.",
];

/// All canned replies for a category.
pub fn canned_replies(category: Category) -> &'static [&'static str] {
    match category {
        Category::Productive => PRODUCTIVE_REPLIES,
        Category::Unproductive => UNPRODUCTIVE_REPLIES,
    }
}

/// Pick one canned reply for `category`.
pub fn canned_reply<R: Rng + ?Sized>(category: Category, rng: &mut R) -> &'static str {
    canned_replies(category)
        .choose(rng)
        .copied()
        .unwrap_or(PRODUCTIVE_REPLIES[0])
}
