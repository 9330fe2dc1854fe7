use activity_booking::config::{Command, ScheduleArg};
use activity_booking::core::schedule_draft::RANGE_WARNING;
use activity_booking::core::report::{
    render_overview, render_reservation_list, write_reservations_csv,
};
use activity_booking::domain::model::{ActivityQuery, NewReview, ReservationStatus};
use activity_booking::domain::ports::{BookingApi, ConfigProvider};
use activity_booking::utils::{logger, validation::Validate};
use activity_booking::{
    ActivityForm, BookingError, BookingService, ClientConfig, CliConfig, CommitOutcome,
    HttpBookingApi, LocalStorage, PendingSchedules, RegistrationEditor, Result, SessionStore,
};
use chrono::Datelike;
use clap::Parser;
use std::path::Path;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    logger::init_cli_logger(config.verbose(), config.json_logs());
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    if let Err(e) = run(cli.command, &config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = e.severity().exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

fn session_store(config: &ClientConfig) -> SessionStore<LocalStorage> {
    let path = Path::new(config.session_path());
    let dir = path
        .parent()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_default();
    let file_name = path
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_else(|| "session.json".to_string());
    SessionStore::new(LocalStorage::new(dir), file_name)
}

async fn run(command: Command, config: &ClientConfig) -> Result<()> {
    let sessions = session_store(config);

    // 登入、登出不讀取既有的 session 檔
    match command {
        Command::Login { email, password } => {
            let api = HttpBookingApi::new(config, None)?;
            let session = api.sign_in(&email, &password).await?;
            sessions.save(&session).await?;
            println!("✅ Signed in as {}", session.user.nickname);
            Ok(())
        }
        Command::Logout => {
            sessions.clear().await?;
            println!("👋 Signed out");
            Ok(())
        }
        command => {
            let token = sessions.current().await?.map(|s| s.access_token);
            let service = BookingService::new(HttpBookingApi::new(config, token)?);
            run_signed_in(command, &service).await
        }
    }
}

async fn run_signed_in(command: Command, service: &BookingService<HttpBookingApi>) -> Result<()> {
    match command {
        // 已在 run 處理
        Command::Login { .. } | Command::Logout => {}
        Command::Whoami => {
            let user = service.api().my_info().await?;
            let avatar = match &user.profile_image_url {
                Some(url) => url.clone(),
                None => user.avatar_initial().map(String::from).unwrap_or_default(),
            };
            println!("{} <{}> [{}]", user.nickname, user.email, avatar);
        }
        Command::Activities {
            page,
            size,
            category,
            keyword,
            sort,
        } => {
            let query = ActivityQuery {
                page: Some(page),
                size: Some(size),
                category,
                keyword,
                sort,
            };
            let result = service.api().list_activities(&query).await?;
            println!("{} activities", result.total_count);
            for activity in result.activities {
                println!(
                    "#{} {} · {} · ★{:.1} ({})",
                    activity.id,
                    activity.title,
                    activity_booking::utils::format::format_krw(activity.price),
                    activity.rating,
                    activity.review_count
                );
            }
        }
        Command::MyActivities => {
            let result = service.api().my_activities().await?;
            for activity in result.activities {
                println!("#{} {}", activity.id, activity.title);
            }
        }
        Command::Status {
            activity_id,
            year,
            month,
        } => {
            let today = chrono::Local::now().date_naive();
            let overview = service
                .reservation_overview(
                    activity_id,
                    year.unwrap_or(today.year()),
                    month.unwrap_or(today.month()),
                )
                .await?;
            print!("{}", render_overview(&overview));
        }
        Command::Reservations { status, csv } => {
            let status = status
                .map(|s| s.parse::<ReservationStatus>())
                .transpose()?;
            let cards = service.reservation_cards(status).await?;
            if csv {
                write_reservations_csv(&cards, std::io::stdout())?;
            } else {
                print!("{}", render_reservation_list(&cards));
            }
        }
        Command::Cancel {
            reservation_id,
            yes,
        } => {
            let mut card = service
                .reservation_cards(None)
                .await?
                .into_iter()
                .find(|c| c.id() == reservation_id)
                .ok_or_else(|| BookingError::ValidationError {
                    message: format!("Reservation {} not found", reservation_id),
                })?;

            card.open_cancel_modal()?;
            if !yes {
                card.close_modal();
                println!(
                    "Cancel {} ({})? Re-run with --yes to confirm.",
                    card.reservation().activity.title,
                    card.summary_line()
                );
                return Ok(());
            }
            service.cancel(&mut card).await?;
            println!("✅ Reservation {} cancelled", reservation_id);
        }
        Command::Review {
            reservation_id,
            rating,
            content,
        } => {
            let mut card = service
                .reservation_cards(Some(ReservationStatus::Completed))
                .await?
                .into_iter()
                .find(|c| c.id() == reservation_id)
                .ok_or_else(|| BookingError::ValidationError {
                    message: format!("Completed reservation {} not found", reservation_id),
                })?;

            card.open_review_modal()?;
            service
                .review(&mut card, NewReview { rating, content })
                .await?;
            println!("✅ Review submitted for reservation {}", reservation_id);
        }
        Command::Notifications { delete } => match delete {
            Some(id) => {
                service.dismiss_notification(id).await?;
                println!("🗑️ Notification {} deleted", id);
            }
            None => {
                let page = service.notifications().await?;
                println!("{} notifications", page.total_count);
                for notification in page.notifications {
                    println!("#{} {}", notification.id, notification.content);
                }
            }
        },
        Command::Register {
            title,
            category,
            description,
            address,
            price,
            banner_image_url,
            schedules,
        } => {
            let mut editor = RegistrationEditor::new(PendingSchedules::default());
            for raw in &schedules {
                let arg: ScheduleArg = raw.parse()?;
                if arg.start_time == arg.end_time {
                    eprintln!("{} ({})", RANGE_WARNING, raw);
                }
                if let CommitOutcome::Rejected { missing } =
                    editor.add_schedule(arg.date, arg.start_time, arg.end_time)?
                {
                    return Err(BookingError::ValidationError {
                        message: format!("Schedule '{}' is missing {}", raw, missing),
                    });
                }
            }

            let form = ActivityForm {
                title,
                category,
                description,
                address,
                price,
                banner_image_url,
                sub_image_urls: Vec::new(),
            };
            let created = service.register_activity(form, editor).await?;
            println!("✅ Registered activity #{} {}", created.id, created.title);
        }
    }

    Ok(())
}
