// Headline animation runtime - drives the count-up, then mirrors snapshots
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::application::poller::SnapshotState;
use crate::domain::animator::{HeadlineValues, ValueAnimator};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Spawn the task that animates the headline values.
///
/// It waits for the first snapshot, runs the 900ms count-up at a fixed
/// frame cadence, then forwards every later snapshot's values verbatim.
/// Dropping the handle aborts the task, so nothing is written after
/// teardown.
pub fn spawn_headline_animator(
    mut snapshots: watch::Receiver<SnapshotState>,
) -> (watch::Receiver<HeadlineValues>, AnimationHandle) {
    let (tx, rx) = watch::channel(HeadlineValues::default());

    let handle = tokio::spawn(async move {
        let Some(target) = first_target(&mut snapshots).await else {
            return;
        };

        let mut animator = ValueAnimator::new(target);
        let mut started = Instant::now();
        let mut frames = tokio::time::interval(FRAME_INTERVAL);

        while !animator.is_settled() {
            tokio::select! {
                _ = frames.tick() => {
                    let _ = tx.send(animator.sample(started.elapsed()));
                }
                changed = snapshots.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    // A fresh snapshot mid-count-up restarts the clock
                    // toward the new values.
                    let target = snapshots
                        .borrow_and_update()
                        .train
                        .as_ref()
                        .map(HeadlineValues::from_snapshot);
                    if let Some(target) = target {
                        animator.retarget(target);
                        started = Instant::now();
                    }
                }
            }
        }

        tracing::debug!("headline count-up settled");
        loop {
            if snapshots.changed().await.is_err() {
                return;
            }
            let values = snapshots
                .borrow_and_update()
                .train
                .as_ref()
                .map(HeadlineValues::from_snapshot);
            if let Some(values) = values {
                let _ = tx.send(values);
            }
        }
    });

    (rx, AnimationHandle { handle })
}

async fn first_target(snapshots: &mut watch::Receiver<SnapshotState>) -> Option<HeadlineValues> {
    loop {
        let target = snapshots
            .borrow_and_update()
            .train
            .as_ref()
            .map(HeadlineValues::from_snapshot);
        if target.is_some() {
            return target;
        }
        if snapshots.changed().await.is_err() {
            return None;
        }
    }
}

pub struct AnimationHandle {
    handle: JoinHandle<()>,
}

impl Drop for AnimationHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::train::TrainSnapshot;

    fn state_with(velocita: f64) -> SnapshotState {
        let train: TrainSnapshot =
            serde_json::from_value(serde_json::json!({ "id": "ETR-1000", "velocita": velocita }))
                .unwrap();
        SnapshotState {
            train: Some(train),
            unreachable: false,
        }
    }

    async fn wait_for(values: &mut watch::Receiver<HeadlineValues>, velocita: f64) {
        tokio::time::timeout(Duration::from_secs(10), async {
            while values.borrow().velocita != velocita {
                values.changed().await.unwrap();
            }
        })
        .await
        .unwrap_or_else(|_| panic!("headline never reached {velocita}"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_counts_up_to_first_snapshot() {
        let (tx, rx) = watch::channel(SnapshotState::default());
        let (mut values, _handle) = spawn_headline_animator(rx);

        assert_eq!(values.borrow().velocita, 0.0);
        tx.send(state_with(200.0)).unwrap();

        wait_for(&mut values, 200.0).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_settled_mirrors_later_snapshots_verbatim() {
        let (tx, rx) = watch::channel(state_with(200.0));
        let (mut values, _handle) = spawn_headline_animator(rx);

        wait_for(&mut values, 200.0).await;

        // Fractional values pass through unrounded once settled.
        tx.send(state_with(180.5)).unwrap();
        wait_for(&mut values, 180.5).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_headline_never_overshoots() {
        let (tx, rx) = watch::channel(SnapshotState::default());
        let (mut values, _handle) = spawn_headline_animator(rx);

        tx.send(state_with(245.0)).unwrap();

        let mut previous = 0.0;
        tokio::time::timeout(Duration::from_secs(10), async {
            loop {
                values.changed().await.unwrap();
                let current = values.borrow().velocita;
                assert!(current >= previous);
                assert!(current <= 245.0);
                if current == 245.0 {
                    break;
                }
                previous = current;
            }
        })
        .await
        .unwrap();
    }
}
