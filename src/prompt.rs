//! Prompt composition for the prediction model.

/// Fixed schema description embedded in every prompt. The wording matters:
/// the model is told the dialect and to answer with SQL only.
pub const SCHEMA_CONTEXT: &str = "
Tabel:
- users(id, name, email, password, role)
- customers(id, name, phone, email)
- categories(id, name)
- products(id, name, category_id, price, stock)
- orders(id, user_id, customer_id, order_date, total_amount, status)
- order_items(id, order_id, product_id, quantity, unit_price, subtotal)
- payments(id, order_id, payment_method, paid_amount, paid_at)
Gunakan PostgreSQL syntax.
";

/// Compose the full prompt for one question: instructions, schema context,
/// the question, and the answer-format constraint.
pub fn build_prompt(question: &str) -> String {
    format!(
        "Ubah pertanyaan menjadi SQL query.\n{SCHEMA_CONTEXT}\nPertanyaan:\n{question}\nJawaban hanya berupa SQL query."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_schema_and_question() {
        let prompt = build_prompt("tampilkan semua customer");
        assert!(prompt.starts_with("Ubah pertanyaan menjadi SQL query."));
        assert!(prompt.contains("order_items(id, order_id, product_id"));
        assert!(prompt.contains("Gunakan PostgreSQL syntax."));
        assert!(prompt.contains("Pertanyaan:\ntampilkan semua customer"));
        assert!(prompt.ends_with("Jawaban hanya berupa SQL query."));
    }

    #[test]
    fn test_schema_lists_seven_tables() {
        let tables = SCHEMA_CONTEXT
            .lines()
            .filter(|l| l.starts_with("- "))
            .count();
        assert_eq!(tables, 7);
    }
}
