// src/common/ids.rs

use uuid::Uuid;

/// Gera um id novo no formato `<prefixo>-<uuid-v4>`.
/// Cada coleção tem seu prefixo fixo (ex: prazos geram `dl-...`),
/// o que torna o tipo do registro legível no próprio id.
pub fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_carries_prefix_and_uuid() {
        let id = new_id("dl");
        assert!(id.starts_with("dl-"));
        // o restante precisa ser um UUID válido
        assert!(Uuid::parse_str(&id[3..]).is_ok());
    }

    #[test]
    fn ids_are_unique() {
        let a = new_id("case");
        let b = new_id("case");
        assert_ne!(a, b);
    }
}
