//! # Batched Lookups
//!
//! Fan-out/fan-in over independent async operations. All futures are polled
//! on the calling task; nothing is spawned. Results are associated with their
//! input by position or key, never by completion order.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::num::NonZeroUsize;

use futures::stream::{self, StreamExt, TryStreamExt};

/// Run `op` over every item with at most `limit` operations in flight
/// (unbounded when `None`) and return the results in input order.
///
/// The first error is returned and the remaining operations are dropped.
pub async fn try_map_ordered<I, T, R, E, F, Fut>(items: I, limit: Option<NonZeroUsize>, op: F) -> Result<Vec<R>, E>
where
  I: IntoIterator<Item = T>,
  F: FnMut(T) -> Fut,
  Fut: Future<Output = Result<R, E>>,
{
  let items: Vec<T> = items.into_iter().collect();
  let in_flight = in_flight(limit, items.len());

  stream::iter(items).map(op).buffered(in_flight).try_collect().await
}

/// Like [`try_map_ordered`], but returns the results keyed by `key(item)`.
pub async fn try_map_keyed<I, T, K, R, E, KF, F, Fut>(
  items: I,
  limit: Option<NonZeroUsize>,
  mut key: KF,
  mut op: F,
) -> Result<HashMap<K, R>, E>
where
  I: IntoIterator<Item = T>,
  K: Eq + Hash,
  KF: FnMut(&T) -> K,
  F: FnMut(T) -> Fut,
  Fut: Future<Output = Result<R, E>>,
{
  let keyed = items.into_iter().map(|item| (key(&item), op(item)));

  let results = try_map_ordered(keyed, limit, |(key, fut)| async move { fut.await.map(|value| (key, value)) }).await?;

  Ok(results.into_iter().collect())
}

fn in_flight(limit: Option<NonZeroUsize>, len: usize) -> usize {
  match limit {
    Some(limit) => limit.get(),
    None => len.max(1),
  }
}

#[cfg(test)]
mod tests {
  use std::cell::Cell;
  use std::time::Duration;

  use tokio::time::sleep;

  use super::*;

  #[tokio::test]
  async fn results_follow_input_order_not_completion_order() {
    let delays = [30u64, 10, 20, 0];

    let results: Result<Vec<u64>, ()> = try_map_ordered(delays, None, |delay| async move {
      sleep(Duration::from_millis(delay)).await;
      Ok(delay)
    })
    .await;

    assert_eq!(results.unwrap(), vec![30, 10, 20, 0]);
  }

  #[tokio::test]
  async fn first_error_is_returned() {
    let results: Result<Vec<i32>, String> = try_map_ordered(1..=5, None, |n| async move {
      if n == 3 { Err(format!("failed on {n}")) } else { Ok(n) }
    })
    .await;

    assert_eq!(results.unwrap_err(), "failed on 3");
  }

  #[tokio::test]
  async fn limit_caps_operations_in_flight() {
    let active = Cell::new(0usize);
    let peak = Cell::new(0usize);

    let results: Result<Vec<usize>, ()> = try_map_ordered(0..8, NonZeroUsize::new(2), |n| {
      let active = &active;
      let peak = &peak;
      async move {
        active.set(active.get() + 1);
        peak.set(peak.get().max(active.get()));
        sleep(Duration::from_millis(5)).await;
        active.set(active.get() - 1);
        Ok(n)
      }
    })
    .await;

    assert_eq!(results.unwrap(), (0..8).collect::<Vec<_>>());
    assert_eq!(peak.get(), 2);
  }

  #[tokio::test]
  async fn empty_input_yields_empty_output() {
    let results: Result<Vec<u8>, ()> = try_map_ordered(Vec::<u8>::new(), None, |n| async move { Ok(n) }).await;
    assert!(results.unwrap().is_empty());
  }

  #[tokio::test]
  async fn keyed_results_are_joined_by_key() {
    let names = ["main", "develop", "feature/x"];

    let lengths: Result<HashMap<String, usize>, ()> = try_map_keyed(
      names,
      None,
      |name| name.to_string(),
      |name| async move { Ok(name.len()) },
    )
    .await;

    let lengths = lengths.unwrap();
    assert_eq!(lengths.len(), 3);
    assert_eq!(lengths["main"], 4);
    assert_eq!(lengths["feature/x"], 9);
  }
}
