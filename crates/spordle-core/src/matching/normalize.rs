use once_cell::sync::Lazy;
use regex::Regex;

// "(" + lo más corto posible hasta el primer ")". Un "(" sin cierre se conserva.
static PARENTHETICAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]*\)").expect("static regex"));

/// Reduce un título crudo a su forma canónica comparable.
///
/// - elimina cada anotación entre paréntesis ("(feat. X)", "(Remix)"), incluidos
///   los paréntesis, en cualquier posición;
/// - recorta y colapsa los espacios internos a uno solo;
/// - pasa a minúsculas.
///
/// Función total: un título que queda vacío tras limpiar devuelve `""`.
/// Es idempotente: `normalize(&normalize(x)) == normalize(x)`.
pub fn normalize(raw_title: &str) -> String {
  let stripped = PARENTHETICAL.replace_all(raw_title, " ");
  let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
  collapsed.to_lowercase()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn strips_annotations_anywhere() {
    assert_eq!(normalize("Bad Romance (Remix)"), "bad romance");
    assert_eq!(normalize("(Intro) Hello (feat. X) World"), "hello world");
  }

  #[test]
  fn parentheses_are_non_greedy() {
    assert_eq!(normalize("A (b) C (d) E"), "a c e");
    // anidados: se quita hasta el primer ")" y el resto queda como texto
    assert_eq!(normalize("a (b (c) d) e"), "a d) e");
  }

  #[test]
  fn unmatched_parenthesis_is_kept() {
    assert_eq!(normalize("Song (Live"), "song (live");
    assert_eq!(normalize("Song) Live"), "song) live");
  }

  #[test]
  fn collapses_whitespace_and_case() {
    assert_eq!(normalize("  Shape \t of\n  YOU  "), "shape of you");
  }

  #[test]
  fn empty_results_are_valid() {
    assert_eq!(normalize(""), "");
    assert_eq!(normalize("(Instrumental)"), "");
    assert_eq!(normalize("   "), "");
  }

  #[test]
  fn handles_non_latin_text() {
    assert_eq!(normalize("ÉTÉ  Indien"), "été indien");
    assert_eq!(normalize("紅蓮華 (TV Size)"), "紅蓮華");
  }

  #[test]
  fn is_idempotent() {
    let samples = [
      "Bad Romance (Remix)",
      "a (b (c) d) e",
      "Song (Live",
      "  MIXED   Case (feat. Someone) ",
      "((()))",
      ")(",
      "İstanbul",
      "",
    ];

    for s in samples {
      let once = normalize(s);
      assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
    }
  }
}
