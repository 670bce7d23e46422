use crate::{reminder::sweep_due_reminders::SweepDueRemindersUseCase, shared::usecase::execute};
use actix_web::rt::time::interval;
use bizdesk_infra::BizdeskContext;
use std::time::Duration;

/// Drives the reminder sweep on a fixed one-minute cadence. The first tick
/// of the interval fires immediately, which doubles as the eager sweep on
/// startup so that a restart does not widen the gap between two sweeps
/// beyond the tolerance window.
pub fn start_reminder_sweep_job(ctx: BizdeskContext) {
    actix_web::rt::spawn(async move {
        let mut minutely_interval = interval(Duration::from_secs(60));
        loop {
            minutely_interval.tick().await;

            let usecase = SweepDueRemindersUseCase;
            let _ = execute(usecase, &ctx).await;
        }
    });
}
