use resolucion_core::BatchResult;

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Render a batch as a plain-text table, one row per processed document.
pub fn format_batch_table(batch: &BatchResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<30} {:<40} {:<12} {:<4}\n",
        "ARCHIVO", "TITULO", "FECHA", "OCR"
    ));
    out.push_str(&format!("{}\n", "-".repeat(89)));

    for result in &batch.resultados {
        out.push_str(&format!(
            "{:<30} {:<40} {:<12} {:<4}\n",
            truncate_string(&result.nombre_archivo_original, 30),
            truncate_string(&result.titulo, 40),
            truncate_string(&result.fecha_publicacion, 12),
            if result.ocr_usado { "si" } else { "no" }
        ));
    }

    out.push_str(&format!(
        "\nTotal procesados: {} (OCR: {})\nExcel consolidado: {}\n",
        batch.total_procesados,
        batch.ocr_count(),
        batch.url_excel_consolidado
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use resolucion_core::ResolutionResult;

    #[test]
    fn truncate_string_short() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("", 5), "");
    }

    #[test]
    fn truncate_string_exact() {
        assert_eq!(truncate_string("hello", 5), "hello");
    }

    #[test]
    fn truncate_string_long() {
        assert_eq!(truncate_string("hello world", 8), "hello...");
        // max_len=2: 2-3=0 chars before "..."
        assert_eq!(truncate_string("abc", 2), "...");
    }

    #[test]
    fn truncate_string_multibyte() {
        assert_eq!(truncate_string("Resolución número", 8), "Resol...");
        assert_eq!(truncate_string("ñandú", 5), "ñandú");
    }

    fn result(name: &str, ocr: bool) -> ResolutionResult {
        ResolutionResult {
            titulo: format!("Resolución {}", name),
            nombre_norma: None,
            descripcion: None,
            fecha_publicacion: "2024-01-31".to_string(),
            publication_type_id: 1,
            category_id: 2,
            ocr_usado: ocr,
            nombre_archivo_original: format!("{}.pdf", name),
            url_acceso_pdf: format!("https://files.example.org/{}.pdf", name),
        }
    }

    #[test]
    fn format_batch_table_lists_every_result() {
        let batch = BatchResult {
            total_procesados: 2,
            url_excel_consolidado: "https://files.example.org/lote.xlsx".to_string(),
            resultados: vec![result("uno", false), result("dos", true)],
        };

        let table = format_batch_table(&batch);
        assert!(table.contains("uno.pdf"));
        assert!(table.contains("dos.pdf"));
        assert!(table.contains("Total procesados: 2 (OCR: 1)"));
        assert!(table.contains("https://files.example.org/lote.xlsx"));
        // header + separator + 2 rows
        assert_eq!(table.lines().take_while(|l| !l.is_empty()).count(), 4);
    }
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
