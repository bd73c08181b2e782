//! Quiz draws: a one-shot random sample of a subject's questions.

use rand::{Rng, seq::SliceRandom};

use crate::{Error, Result, question::Question, store::QuizStore};

/// Maximum number of questions in one draw.
pub const QUIZ_SIZE: usize = 5;

/// Uniformly sample up to `size` items without replacement.
///
/// Shuffles the whole pool and keeps the head, so every ordered selection is
/// equally likely. Pools smaller than `size` come back whole (shuffled).
pub fn sample<T, R>(mut pool: Vec<T>, size: usize, rng: &mut R) -> Vec<T>
where
  R: Rng + ?Sized,
{
  pool.shuffle(rng);
  pool.truncate(size);
  pool
}

/// Draw up to [`QUIZ_SIZE`] questions for `matiere_id`.
///
/// The identifier is neither validated nor checked for existence: a subject
/// with no questions yields an empty draw, which is a success. Each call is
/// an independent draw.
pub async fn draw<S: QuizStore>(
  store: &S,
  matiere_id: &str,
) -> Result<Vec<Question>> {
  let pool = store
    .questions_for_matiere(matiere_id)
    .await
    .map_err(Error::store)?;

  Ok(sample(pool, QUIZ_SIZE, &mut rand::rng()))
}
