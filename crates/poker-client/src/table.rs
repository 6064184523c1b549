//! The table page: login gate, auto-fetch on mount, and seat layout.

use poker_core::protocol::{GameId, GameSnapshot, PlayerView, SeatIndex};
use poker_core::seats::{ACTION_CENTER, SeatAnchor, anchor_for_seat};
use tracing::{debug, warn};

use crate::flow::{FlowEffect, Step};
use crate::gateway::{Command, Completion, RequestId};
use crate::login::{LoginEvent, LoginFlow};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableStatus {
    /// No passphrase yet; the login form owns the page.
    Login(LoginFlow),
    /// Passphrase known, status fetch in flight. `snapshot` is whatever we
    /// already have to show meanwhile.
    Syncing {
        request: RequestId,
        snapshot: Option<GameSnapshot>,
    },
    Ready(GameSnapshot),
    /// A known-good passphrase was refused. Only a reload gets out of here.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    Login(LoginEvent),
    Completed(Completion),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub game_id: GameId,
    pub passphrase: String,
    pub status: TableStatus,
}

impl TableView {
    /// Mount the table for a game.
    ///
    /// With an empty passphrase the login form is shown. With a passphrase
    /// and a cached snapshot the table is shown as is. With a passphrase and
    /// nothing cached a status fetch goes out under `request`.
    pub fn mount(
        game_id: GameId,
        passphrase: String,
        cached: Option<GameSnapshot>,
        request: RequestId,
    ) -> Step<Self> {
        if passphrase.is_empty() {
            return Step::stay(Self {
                game_id,
                passphrase,
                status: TableStatus::Login(LoginFlow::default()),
            });
        }
        if let Some(snapshot) = cached {
            return Step::stay(Self {
                game_id,
                passphrase,
                status: TableStatus::Ready(snapshot),
            });
        }
        let command = Command::FetchStatus {
            request,
            game_id,
            passphrase: passphrase.clone(),
        };
        Step::with(
            Self {
                game_id,
                passphrase,
                status: TableStatus::Syncing {
                    request,
                    snapshot: None,
                },
            },
            FlowEffect::Send(command),
        )
    }

    /// Mount right after creating a game, showing the creation response
    /// while the first status fetch is in flight.
    pub fn mount_created(snapshot: GameSnapshot, passphrase: String, request: RequestId) -> Step<Self> {
        let game_id = snapshot.game_id;
        let command = Command::FetchStatus {
            request,
            game_id,
            passphrase: passphrase.clone(),
        };
        Step::with(
            Self {
                game_id,
                passphrase,
                status: TableStatus::Syncing {
                    request,
                    snapshot: Some(snapshot),
                },
            },
            FlowEffect::Send(command),
        )
    }

    pub fn is_authenticated(&self) -> bool {
        !self.passphrase.is_empty() && !matches!(self.status, TableStatus::Login(_))
    }

    /// The snapshot to draw, if any.
    pub fn snapshot(&self) -> Option<&GameSnapshot> {
        match &self.status {
            TableStatus::Ready(snapshot) => Some(snapshot),
            TableStatus::Syncing { snapshot, .. } => snapshot.as_ref(),
            TableStatus::Login(_) | TableStatus::Failed(_) => None,
        }
    }

    /// Handle an event. A `LoggedIn` effect means the view now holds a fresh
    /// snapshot under a working passphrase.
    pub fn update(self, event: TableEvent) -> Step<Self> {
        let TableView {
            game_id,
            passphrase,
            status,
        } = self;
        match (status, event) {
            (TableStatus::Login(flow), TableEvent::Login(event)) => {
                Self::login_step(game_id, flow, event)
            }
            (TableStatus::Login(flow), TableEvent::Completed(completion)) => {
                Self::login_step(game_id, flow, LoginEvent::Completed(completion))
            }
            (TableStatus::Syncing { request, .. }, TableEvent::Completed(completion))
                if completion.request == request =>
            {
                match completion.result {
                    Ok(fresh) => Step::with(
                        Self {
                            game_id,
                            passphrase: passphrase.clone(),
                            status: TableStatus::Ready(fresh.clone()),
                        },
                        FlowEffect::LoggedIn {
                            snapshot: fresh,
                            passphrase,
                        },
                    ),
                    Err(err) => {
                        warn!(game_id, error = %err, "stored passphrase rejected");
                        Step::stay(Self {
                            game_id,
                            passphrase,
                            status: TableStatus::Failed(err.to_string()),
                        })
                    }
                }
            }
            (status, event) => {
                if let TableEvent::Completed(completion) = &event {
                    debug!(request = %completion.request, "dropping stale table response");
                }
                Step::stay(Self {
                    game_id,
                    passphrase,
                    status,
                })
            }
        }
    }

    fn login_step(game_id: GameId, flow: LoginFlow, event: LoginEvent) -> Step<Self> {
        let step = flow.update(game_id, event);
        match step.effect {
            Some(FlowEffect::LoggedIn {
                snapshot,
                passphrase,
            }) => Step::with(
                Self {
                    game_id,
                    passphrase: passphrase.clone(),
                    status: TableStatus::Ready(snapshot.clone()),
                },
                FlowEffect::LoggedIn {
                    snapshot,
                    passphrase,
                },
            ),
            effect => Step {
                state: Self {
                    game_id,
                    passphrase: String::new(),
                    status: TableStatus::Login(step.state),
                },
                effect,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Seat layout
// ---------------------------------------------------------------------------

/// An occupied seat, ready to paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedSeat<'a> {
    pub seat: SeatIndex,
    pub anchor: SeatAnchor,
    pub player: &'a PlayerView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout<'a> {
    /// Ascending by seat index.
    pub seats: Vec<PlacedSeat<'a>>,
    pub action_center: SeatAnchor,
}

/// Place every occupied seat. Seats listed as empty, or with no player,
/// produce nothing.
pub fn layout(snapshot: &GameSnapshot) -> TableLayout<'_> {
    let seats = snapshot
        .players
        .keys()
        .filter_map(|&seat| {
            snapshot.occupant(seat).map(|player| PlacedSeat {
                seat,
                anchor: anchor_for_seat(seat),
                player,
            })
        })
        .collect();
    TableLayout {
        seats,
        action_center: ACTION_CENTER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::GatewayError;
    use std::collections::{BTreeMap, BTreeSet};

    fn seat(i: usize) -> SeatIndex {
        SeatIndex::new(i).unwrap()
    }

    fn player(name: &str) -> PlayerView {
        PlayerView {
            name: name.into(),
            chips: 100,
            cards: Vec::new(),
        }
    }

    fn snapshot(players: &[usize], empty: &[usize]) -> GameSnapshot {
        GameSnapshot {
            game_id: 1,
            game_title: None,
            starter_chips: Some(100),
            blind_size: 10,
            empty_seats: empty.iter().map(|&i| seat(i)).collect(),
            players: players
                .iter()
                .map(|&i| (seat(i), player(&format!("p{i}"))))
                .collect(),
        }
    }

    #[test]
    fn layout_is_players_minus_empty_seats() {
        let snap = snapshot(&[5, 0, 3, 6], &[1, 2, 3, 4, 7]);
        let placed: Vec<usize> = layout(&snap).seats.iter().map(|s| s.seat.get()).collect();
        assert_eq!(placed, vec![0, 5, 6]);
    }

    #[test]
    fn layout_uses_seat_anchors() {
        let snap = snapshot(&[2], &[]);
        let table = layout(&snap);
        assert_eq!(table.seats[0].anchor, anchor_for_seat(seat(2)));
        assert_eq!(table.seats[0].player.name, "p2");
        assert_eq!(table.action_center, ACTION_CENTER);
    }

    #[test]
    fn empty_table_places_nothing() {
        let snap = GameSnapshot {
            players: BTreeMap::new(),
            empty_seats: SeatIndex::all().collect::<BTreeSet<_>>(),
            ..snapshot(&[], &[])
        };
        assert!(layout(&snap).seats.is_empty());
    }

    #[test]
    fn mount_without_passphrase_shows_login() {
        let step = TableView::mount(42, String::new(), None, RequestId(1));
        assert_eq!(step.effect, None);
        assert!(matches!(step.state.status, TableStatus::Login(_)));
        assert!(!step.state.is_authenticated());
    }

    #[test]
    fn mount_with_cached_snapshot_does_not_fetch() {
        let step = TableView::mount(1, "pw".into(), Some(snapshot(&[0], &[])), RequestId(1));
        assert_eq!(step.effect, None);
        assert!(matches!(step.state.status, TableStatus::Ready(_)));
    }

    #[test]
    fn mount_with_passphrase_fetches() {
        let step = TableView::mount(1, "pw".into(), None, RequestId(8));
        assert_eq!(
            step.effect,
            Some(FlowEffect::Send(Command::FetchStatus {
                request: RequestId(8),
                game_id: 1,
                passphrase: "pw".into(),
            }))
        );
        assert!(step.state.is_authenticated());
    }

    #[test]
    fn failed_auto_fetch_is_fatal() {
        let view = TableView::mount(1, "pw".into(), None, RequestId(2)).state;
        let step = view.update(TableEvent::Completed(Completion {
            request: RequestId(2),
            result: Err(GatewayError::Server("Could not find/load game".into())),
        }));
        assert_eq!(
            step.state.status,
            TableStatus::Failed("Could not find/load game".into())
        );
    }

    #[test]
    fn auto_fetch_success_is_ready() {
        let view = TableView::mount(1, "pw".into(), None, RequestId(2)).state;
        let step = view.update(TableEvent::Completed(Completion {
            request: RequestId(2),
            result: Ok(snapshot(&[1], &[])),
        }));
        assert_eq!(step.state.status, TableStatus::Ready(snapshot(&[1], &[])));
        assert!(matches!(step.effect, Some(FlowEffect::LoggedIn { .. })));
    }

    #[test]
    fn login_success_authenticates() {
        let view = TableView::mount(1, String::new(), None, RequestId(1)).state;
        let view = view
            .update(TableEvent::Login(LoginEvent::PassphraseChanged("pw".into())))
            .state;
        let view = view
            .update(TableEvent::Login(LoginEvent::Submit {
                request: RequestId(2),
            }))
            .state;
        let step = view.update(TableEvent::Completed(Completion {
            request: RequestId(2),
            result: Ok(snapshot(&[0], &[])),
        }));
        assert_eq!(step.state.passphrase, "pw");
        assert!(step.state.is_authenticated());
        assert!(step.state.snapshot().is_some());
    }

    #[test]
    fn stale_sync_completion_is_dropped() {
        let view = TableView::mount(1, "pw".into(), None, RequestId(3)).state;
        let step = view.clone().update(TableEvent::Completed(Completion {
            request: RequestId(1),
            result: Ok(snapshot(&[0], &[])),
        }));
        assert_eq!(step.state, view);
    }
}
