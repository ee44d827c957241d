use std::{fmt, future::Future, time::Duration};

use crate::error::RelayError;

/// Normalized result of one bounded operation against one relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
  Success(T),
  Failure(String),
  TimedOut,
}

impl<T> Outcome<T> {
  pub fn is_success(&self) -> bool {
    matches!(self, Self::Success(_))
  }

  pub fn success(self) -> Option<T> {
    match self {
      Self::Success(value) => Some(value),
      _ => None,
    }
  }
}

impl<T> From<RelayError> for Outcome<T> {
  fn from(err: RelayError) -> Self {
    if err.is_timeout() {
      Self::TimedOut
    } else {
      Self::Failure(err.to_string())
    }
  }
}

impl<T> fmt::Display for Outcome<T> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::Success(_) => write!(f, "success"),
      Self::Failure(reason) => write!(f, "failure: {reason}"),
      Self::TimedOut => write!(f, "timed out"),
    }
  }
}

///
/// Runs `operation` against a timer of `duration`.
///
/// Whichever finishes first decides the result. When the timer wins the
/// operation future is dropped, so whatever it was holding (a socket, a
/// buffer of events) goes away with it and can't reach the caller.
/// A zero `duration` times out right away without polling `operation`.
///
pub async fn race_with_timeout<F, T, E>(operation: F, duration: Duration) -> Outcome<T>
where
  F: Future<Output = Result<T, E>>,
  E: fmt::Display,
{
  if duration.is_zero() {
    return Outcome::TimedOut;
  }

  match tokio::time::timeout(duration, operation).await {
    Ok(Ok(value)) => Outcome::Success(value),
    Ok(Err(err)) => Outcome::Failure(err.to_string()),
    Err(_) => Outcome::TimedOut,
  }
}
