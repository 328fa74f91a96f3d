//! Rule-based reply generation.
//!
//! Replies are picked from an ordered keyword table: the input is trimmed and
//! lowercased, then the first rule with a keyword contained in the text wins.

/// Preamble prepended to every assistant reply.
pub const SYSTEM_PROMPT: &str = "Sei Peer, un assistente virtuale gentile, pratico e conciso. \
Rispondi in italiano, proponi passi chiari, e se utile fornisci elenchi puntati.";

/// Reply for blank input.
pub const EMPTY_REPLY: &str = "Dimmi pure come posso aiutarti.";

/// Reply when no keyword rule matches.
pub const FALLBACK_REPLY: &str = "Ecco come possiamo procedere:\n\
- Spiegami il tuo obiettivo o problema\n\
- Ti propongo i prossimi passi\n\
- Se vuoi, salvo appunti in questa conversazione";

/// A keyword rule: any keyword contained in the normalized text selects `reply`.
struct Rule {
    keywords: &'static [&'static str],
    reply: &'static str,
}

const RULES: &[Rule] = &[
    Rule {
        keywords: &["ciao", "buongiorno", "buonasera", "hey"],
        reply: "Ciao! Sono Peer. Come posso aiutarti oggi?",
    },
    Rule {
        keywords: &["todo", "attività", "task"],
        reply: "Posso aiutarti a creare un elenco di attività. \
Scrivimi gli elementi e li salverò nella conversazione.",
    },
    Rule {
        keywords: &["aiuto", "help"],
        reply: "Certo! Dimmi l'obiettivo e ti propongo i prossimi passi pratici.",
    },
    Rule {
        keywords: &["ricorda", "promemoria"],
        reply: "Posso prendere nota nella chat, così puoi ritrovarla più tardi in questa conversazione.",
    },
];

/// Pick the canned reply for `text`.
pub fn generate_reply(text: &str) -> &'static str {
    let normalized = text.trim().to_lowercase();
    if normalized.is_empty() {
        return EMPTY_REPLY;
    }

    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| normalized.contains(k)))
        .map(|rule| rule.reply)
        .unwrap_or(FALLBACK_REPLY)
}

/// Full assistant reply: the system preamble, a blank line, then the rule reply.
pub fn compose_reply(text: &str) -> String {
    format!("{SYSTEM_PROMPT}\n\n{}", generate_reply(text))
}
