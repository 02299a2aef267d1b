use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Normaliza texto para comparación: descompone (NFD), descarta las marcas
/// combinantes y pasa a minúsculas. "Querétaro" -> "queretaro".
pub fn normalizar_texto(texto: &str) -> String {
    texto
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Contención insensible a mayúsculas y acentos. El término debe llegar ya
/// normalizado (se normaliza una vez por pasada de filtrado, no por campo).
pub fn contiene_normalizado(texto: &str, termino_normalizado: &str) -> bool {
    normalizar_texto(texto).contains(termino_normalizado)
}
