//! Semantic analysis: sentence embeddings, coherence, extractive summary
//!
//! The embedding model is an injected capability behind the
//! [`SentenceEmbedder`] trait. The engine holds a lazily-initialized
//! shared handle; nothing here touches global state, and a failing or
//! absent embedder degrades to documented neutral scores.

pub mod coherence;
pub mod summary;

use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::OnceCell;

use crate::error::SemanticError;

/// Sentence embedding capability
#[async_trait::async_trait]
pub trait SentenceEmbedder: Send + Sync {
    /// Embed each sentence into a dense vector
    ///
    /// Must return exactly one vector per input sentence.
    async fn embed(&self, sentences: &[String]) -> Result<Vec<Vec<f32>>, SemanticError>;
}

type EmbedderFactory =
    Box<dyn Fn() -> BoxFuture<'static, Result<Arc<dyn SentenceEmbedder>, SemanticError>> + Send + Sync>;

/// Lazily-initialized shared embedder
///
/// The factory runs at most once, on first use; concurrent first uses
/// are serialized by the cell. A handle built from an existing embedder
/// skips initialization entirely.
pub struct EmbedderHandle {
    cell: OnceCell<Arc<dyn SentenceEmbedder>>,
    factory: Option<EmbedderFactory>,
}

impl EmbedderHandle {
    /// Handle that initializes the embedder on first use
    pub fn from_factory<F>(factory: F) -> Self
    where
        F: Fn() -> BoxFuture<'static, Result<Arc<dyn SentenceEmbedder>, SemanticError>>
            + Send
            + Sync
            + 'static,
    {
        Self {
            cell: OnceCell::new(),
            factory: Some(Box::new(factory)),
        }
    }

    /// Handle over an already-constructed embedder
    pub fn from_embedder(embedder: Arc<dyn SentenceEmbedder>) -> Self {
        Self {
            cell: OnceCell::new_with(Some(embedder)),
            factory: None,
        }
    }

    /// Get the embedder, running the factory if needed
    pub async fn get(&self) -> Result<&Arc<dyn SentenceEmbedder>, SemanticError> {
        match &self.factory {
            Some(factory) => self.cell.get_or_try_init(|| factory()).await,
            None => self.cell.get().ok_or(SemanticError::NotConfigured),
        }
    }
}

/// Cosine similarity, 0.0 when either vector has zero norm
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += (*x as f64) * (*y as f64);
        norm_a += (*x as f64) * (*x as f64);
        norm_b += (*y as f64) * (*y as f64);
    }
    let norm_a = norm_a.sqrt();
    let norm_b = norm_b.sqrt();
    if norm_a > 0.0 && norm_b > 0.0 {
        dot / (norm_a * norm_b)
    } else {
        0.0
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn cosine_basics() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-9);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-9);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[tokio::test]
    async fn factory_runs_once() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);

        let handle = EmbedderHandle::from_factory(|| {
            Box::pin(async {
                CALLS.fetch_add(1, Ordering::SeqCst);
                Ok(Arc::new(mock::MockEmbedder { vectors: vec![] }) as Arc<dyn SentenceEmbedder>)
            })
        });

        handle.get().await.unwrap();
        handle.get().await.unwrap();
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn prebuilt_handle_needs_no_factory() {
        let handle = EmbedderHandle::from_embedder(Arc::new(mock::MockEmbedder {
            vectors: vec![vec![1.0]],
        }));
        assert!(handle.get().await.is_ok());
    }
}
