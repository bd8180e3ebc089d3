// SPDX-License-Identifier: MPL-2.0
//! Rate-limit cooldown bookkeeping.
//!
//! Arming the cooldown hands out a [`CooldownTicket`]. The application sleeps on
//! the ticket in a background task and feeds it back once the delay elapsed.
//! Only the ticket of the currently armed cooldown can lift it: disarming (new
//! search, teardown) bumps the epoch so a late ticket becomes a no-op.

use std::time::Duration;

/// Proof that a specific cooldown was armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownTicket {
    epoch: u64,
    duration: Duration,
}

impl CooldownTicket {
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

/// Sleeps for the ticket's duration and returns it.
pub async fn wait(ticket: CooldownTicket) -> CooldownTicket {
    tokio::time::sleep(ticket.duration).await;
    ticket
}

#[derive(Debug, Default)]
pub struct Cooldown {
    epoch: u64,
    active: bool,
}

impl Cooldown {
    /// Starts a cooldown, superseding any previous one.
    pub fn arm(&mut self, duration: Duration) -> CooldownTicket {
        self.epoch = self.epoch.wrapping_add(1);
        self.active = true;
        CooldownTicket {
            epoch: self.epoch,
            duration,
        }
    }

    /// Lifts the cooldown immediately and invalidates outstanding tickets.
    pub fn disarm(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.active = false;
    }

    /// Lifts the cooldown if `ticket` belongs to the armed one.
    pub fn expire(&mut self, ticket: CooldownTicket) -> bool {
        if self.active && ticket.epoch == self.epoch {
            self.active = false;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIVE_MINUTES: Duration = Duration::from_secs(300);

    #[test]
    fn expire_with_current_ticket_lifts_cooldown() {
        let mut cooldown = Cooldown::default();
        let ticket = cooldown.arm(FIVE_MINUTES);
        assert!(cooldown.is_active());
        assert!(cooldown.expire(ticket));
        assert!(!cooldown.is_active());
    }

    #[test]
    fn stale_ticket_is_ignored_after_rearm() {
        let mut cooldown = Cooldown::default();
        let first = cooldown.arm(FIVE_MINUTES);
        let second = cooldown.arm(FIVE_MINUTES);
        assert!(!cooldown.expire(first));
        assert!(cooldown.is_active());
        assert!(cooldown.expire(second));
    }

    #[test]
    fn disarm_invalidates_outstanding_ticket() {
        let mut cooldown = Cooldown::default();
        let ticket = cooldown.arm(FIVE_MINUTES);
        cooldown.disarm();
        assert!(!cooldown.is_active());
        assert!(!cooldown.expire(ticket));
    }

    #[tokio::test(start_paused = true)]
    async fn wait_sleeps_for_full_duration() {
        let mut cooldown = Cooldown::default();
        let ticket = cooldown.arm(FIVE_MINUTES);

        let early = tokio::time::timeout(Duration::from_secs(299), wait(ticket)).await;
        assert!(early.is_err());

        let start = tokio::time::Instant::now();
        let returned = wait(ticket).await;
        assert_eq!(returned, ticket);
        assert!(start.elapsed() >= FIVE_MINUTES);
    }
}
