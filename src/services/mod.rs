pub mod answer_variant_service;
pub mod completion_service;
pub mod pipeline_service;
pub mod sequence_service;
pub mod text_normalizer;
