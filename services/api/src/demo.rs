use crate::infra::{seed_demo_data, InMemoryStores};
use atlas_admin::audit::AuditLog;
use atlas_admin::config::QrConfig;
use atlas_admin::error::{AppError, InternalError};
use atlas_admin::events::{EventAdminService, EventInfo, NewEvent, QrRenderer, UserId};
use atlas_admin::recruitment::{
    AppliedRoleId, ApplicationStatus, RecruitmentService, Selection, StatusPopup, UpdateOutcome,
    STATUS_SWATCHES,
};
use chrono::{Duration, Utc};
use clap::Args;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Dismiss confirmation dialogs instead of confirming them.
    #[arg(long)]
    pub(crate) decline: bool,
    /// Skip the event administration portion of the demo.
    #[arg(long)]
    pub(crate) skip_events: bool,
    /// Minimum QR code edge length in pixels.
    #[arg(long)]
    pub(crate) qr_size: Option<u32>,
}

const STATUS_PLAN: [(&str, ApplicationStatus); 5] = [
    ("ar-001", ApplicationStatus::Rejected),
    ("ar-002", ApplicationStatus::Accepted),
    ("ar-003", ApplicationStatus::Interviewed),
    ("ar-004", ApplicationStatus::Offered),
    ("ar-404", ApplicationStatus::Pending),
];

pub(crate) fn print_statuses() {
    println!("Application statuses");
    for swatch in STATUS_SWATCHES.iter() {
        let confirmation = if swatch.status.requires_confirmation() {
            "confirm"
        } else {
            "immediate"
        };
        println!(
            "  {:<12} {:<15} {}  ({})",
            swatch.status.wire_name(),
            swatch.label,
            swatch.color,
            confirmation
        );
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        decline,
        skip_events,
        qr_size,
    } = args;

    let stores = InMemoryStores::default();
    seed_demo_data(&stores).map_err(InternalError::from_cause)?;

    println!("Atlas admin demo");
    print_statuses();

    run_status_updates(&stores, decline)?;

    if !skip_events {
        let qr = match qr_size {
            Some(min_dimension) => QrRenderer::new(QrConfig::with_min_dimension(min_dimension)?),
            None => QrRenderer::default(),
        };
        run_event_admin(&stores, qr)?;
    }

    let entries = stores.audit.entries().map_err(InternalError::from_cause)?;
    println!("\nAudit log ({} entries)", entries.len());
    for entry in entries {
        println!(
            "  [{}] {:?} {}: {}",
            entry.created_at.format("%H:%M:%S"),
            entry.log_type,
            entry.title.label(),
            entry.message
        );
    }

    Ok(())
}

fn run_status_updates(stores: &InMemoryStores, decline: bool) -> Result<(), AppError> {
    let service = Arc::new(RecruitmentService::new(
        stores.applied_roles.clone(),
        stores.audit.clone(),
    ));

    println!("\nStatus updates");
    for (id, target) in STATUS_PLAN {
        let applied_role_id = AppliedRoleId(id.to_string());
        let current = service
            .get_applied_role(&applied_role_id)?
            .map(|record| record.status)
            .unwrap_or(ApplicationStatus::Pending);

        let reader = service.clone();
        let mut popup = StatusPopup::new(applied_role_id, current, service.clone(), move || {
            reader.list_applied_roles()
        });

        let outcome = match popup.select(target) {
            Selection::Committed(outcome) => Some(outcome),
            Selection::AwaitingConfirmation(status) if decline => {
                popup.cancel();
                println!("  {id}: {current} -> {status} dismissed at confirmation");
                None
            }
            Selection::AwaitingConfirmation(_) => popup.confirm(),
        };

        match outcome {
            Some(UpdateOutcome::Applied(status)) => {
                println!(
                    "  {id}: {current} -> {status} ({})",
                    popup.indicator().color
                );
            }
            Some(UpdateOutcome::Failed { message }) => {
                println!("  {id}: {current} -> {target} failed: {message}");
            }
            Some(UpdateOutcome::Stale) | None => {}
        }
        for toast in popup.toasts() {
            println!("    toast: {} / {}", toast.title, toast.description);
        }
    }

    Ok(())
}

fn run_event_admin(stores: &InMemoryStores, qr: QrRenderer) -> Result<(), AppError> {
    let service = EventAdminService::new(
        stores.events.clone(),
        stores.users.clone(),
        stores.audit.clone(),
        qr,
    );

    println!("\nUser directory");
    for user in service.get_all_users()? {
        println!(
            "  {:<16} {:<20} {:<12} {}",
            user.id,
            user.name,
            user.department.as_deref().unwrap_or("-"),
            user.roles.join(", ")
        );
    }

    let start = Utc::now() + Duration::days(7);
    let attendees = |ids: &[&str]| -> Vec<UserId> {
        ids.iter().map(|id| UserId(id.to_string())).collect()
    };

    service.create_event(NewEvent {
        name: "Recruiting kickoff".to_string(),
        start_date: start,
        end_date: start + Duration::hours(2),
        departments: vec!["Engineering".to_string()],
        attendees: attendees(&["user-ada", "user-grace", "user-alan"]),
        is_qr_required: true,
    });
    service.create_event(NewEvent {
        name: "Design review".to_string(),
        start_date: start + Duration::days(1),
        end_date: start + Duration::days(1) + Duration::hours(1),
        departments: Vec::new(),
        attendees: attendees(&["user-katherine"]),
        is_qr_required: false,
    });
    service.create_event(NewEvent {
        name: "Ghost meetup".to_string(),
        start_date: start,
        end_date: start + Duration::hours(1),
        departments: Vec::new(),
        attendees: attendees(&["user-nobody"]),
        is_qr_required: false,
    });

    let events = stores.events.all().map_err(InternalError::from_cause)?;
    println!("\nEvents created: {}", events.len());

    if let Some(kickoff) = events.first() {
        service.start_event(&kickoff.id).map_err(InternalError::from_cause)?;
        for user in ["user-ada", "user-grace", "user-ada", "user-margaret"] {
            match service.check_in(&kickoff.id, &UserId(user.to_string())) {
                Ok(()) => println!("  check-in {user}: ok"),
                Err(err) => println!("  check-in {user}: {err}"),
            }
        }
    }

    for event in &events {
        if let Some(info) = service.get_event_info(&event.id)? {
            render_event_info(&info);
        }
    }

    Ok(())
}

fn render_event_info(info: &EventInfo) {
    println!("\n  {} ({})", info.name, info.id);
    println!(
        "    {} to {}, started: {}",
        info.start_date.format("%Y-%m-%d %H:%M"),
        info.end_date.format("%H:%M"),
        info.has_started
    );
    println!(
        "    attendance {}/{}",
        info.counts.attendance, info.counts.attendees
    );
    for attendee in &info.attendees {
        println!("    - {}", attendee.name);
    }
    match &info.qr_code {
        Some(url) => println!("    qr code: {} bytes of png data url", url.len()),
        None => println!("    qr code: not requested"),
    }
}
