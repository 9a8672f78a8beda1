pub mod answer_key;
pub mod case_text;
pub mod comparison;
pub mod diagnosis;
pub mod osce;
