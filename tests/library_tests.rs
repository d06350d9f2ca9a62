//! Business rules exercised through the library on an in-memory database.

use chrono::NaiveDate;
use tradetracker::config::Config;
use tradetracker::core::auth::AuthLogic;
use tradetracker::core::calculator::compliance::{RevenueSource, weekly_crew_summary};
use tradetracker::core::crews::CrewLogic;
use tradetracker::core::elevations::ElevationLogic;
use tradetracker::core::hours::HoursLogic;
use tradetracker::core::job_logs::JobLogLogic;
use tradetracker::core::job_templates::JobTemplateLogic;
use tradetracker::core::legacy_jobs::LegacyJobLogic;
use tradetracker::core::trades::TradeLogic;
use tradetracker::core::users::UserLogic;
use tradetracker::db::initialize::init_db;
use tradetracker::db::pool::DbPool;
use tradetracker::errors::AppError;
use tradetracker::models::crew::CrewInput;
use tradetracker::models::hours::HoursInput;
use tradetracker::models::job::ElevationInput;
use tradetracker::models::job_log::JobLogInput;
use tradetracker::models::legacy_job::LegacyJobInput;
use tradetracker::models::profile::CreateUserInput;
use tradetracker::models::role::Role;
use tradetracker::models::session::Session;
use tradetracker::models::trade::TradeInput;
use tradetracker::utils::date::DateRange;

const PASSWORD: &str = "secret-pass";

struct Env {
    pool: DbPool,
    cfg: Config,
    admin: Session,
}

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn setup() -> Env {
    let mut pool = DbPool::open_in_memory().unwrap();
    init_db(&pool.conn).unwrap();

    let mut cfg = Config::with_database(":memory:".into());
    cfg.password_cost = 4;

    AuthLogic::bootstrap_admin(&mut pool, &cfg, "admin@example.com", PASSWORD, "Ada", "Admin")
        .unwrap();
    let admin = AuthLogic::login(&mut pool, &cfg, "admin@example.com", PASSWORD).unwrap();

    Env { pool, cfg, admin }
}

impl Env {
    fn crew(&mut self, name: &str) -> String {
        let input = CrewInput {
            name: name.into(),
            trade_id: None,
        };
        CrewLogic::create(&mut self.pool, &self.admin, &input).unwrap().id
    }

    fn user(&mut self, email: &str, role: Role, crew: Option<&str>, rate: Option<f64>) -> Session {
        let input = CreateUserInput {
            email: email.into(),
            password: PASSWORD.into(),
            first_name: "Sam".into(),
            last_name: email.split('@').next().unwrap().into(),
            phone_number: None,
            role,
            crew_id: crew.map(str::to_string),
            hourly_rate: rate,
        };
        let outcome = UserLogic::create(&mut self.pool, &self.admin, &self.cfg, &input).unwrap();
        assert!(outcome.warning.is_none());
        AuthLogic::login(&mut self.pool, &self.cfg, email, PASSWORD).unwrap()
    }

    fn hours(&mut self, who: &Session, date: &str, h: f64) {
        let input = HoursInput {
            date_worked: d(date),
            hours_worked: h,
            notes: None,
        };
        HoursLogic::submit(&mut self.pool, who, &input).unwrap();
    }

    fn job_with_elevation(&mut self, name: &str, yardage: f64, rate: f64) -> (String, String) {
        let job = JobTemplateLogic::create(&mut self.pool, &self.admin, name, true).unwrap();
        let input = ElevationInput {
            job_id: job.id.clone(),
            elevation_name: "Front".into(),
            yardage,
            rate,
        };
        let elevation = ElevationLogic::add(&mut self.pool, &self.admin, &input).unwrap();
        (job.id, elevation.id)
    }
}

fn log_input(job: &str, elevation: &str, date: &str) -> JobLogInput {
    JobLogInput {
        job_id: job.into(),
        elevation_id: elevation.into(),
        lot: "Lot 3".into(),
        date_worked: Some(d(date)),
        notes: None,
    }
}

#[test]
fn weekly_summary_from_legacy_jobs() {
    let mut env = setup();
    let crew = env.crew("Framing");
    let worker = env.user("ana@example.com", Role::Worker, Some(&crew), Some(20.0));
    let foreman = env.user("ben@example.com", Role::Foreman, Some(&crew), None);

    env.hours(&worker, "2025-01-06", 8.0);
    env.hours(&worker, "2025-01-07", 8.0);
    env.hours(&worker, "2025-01-13", 8.0);

    let job = LegacyJobInput {
        job_name: "Maple St".into(),
        elevation: None,
        lot_address: Some("12 Maple St".into()),
        yardage: 100.0,
        rate: 5.0,
        notes: None,
        date: Some(d("2025-01-08")),
    };
    let created = LegacyJobLogic::create(&mut env.pool, &foreman, &job).unwrap();
    assert_eq!(created.total, 500.0);
    assert_eq!(created.crew_id, crew);

    let s = weekly_crew_summary(&mut env.pool, &env.admin, &crew, "2025-01-06", RevenueSource::Legacy)
        .unwrap();

    assert_eq!(s.week_end, d("2025-01-12"));
    assert_eq!(s.total_job_earnings, 500.0);
    assert_eq!(s.workers.len(), 1);
    assert_eq!(s.workers[0].total_hours, 16.0);
    assert_eq!(s.total_minimum_required, 320.0);
    assert_eq!(s.bonus_pool, 180.0);
    assert!(s.is_compliant);
}

#[test]
fn weekly_summary_from_job_logs() {
    let mut env = setup();
    let crew = env.crew("Framing");
    let worker = env.user("ana@example.com", Role::Worker, Some(&crew), Some(20.0));
    let foreman = env.user("ben@example.com", Role::Foreman, Some(&crew), None);
    let (job, elevation) = env.job_with_elevation("Oak Ridge", 10.0, 5.5);

    env.hours(&worker, "2025-01-06", 8.0);
    JobLogLogic::create(&mut env.pool, &foreman, &log_input(&job, &elevation, "2025-01-07")).unwrap();

    let s = weekly_crew_summary(&mut env.pool, &env.admin, &crew, "2025-01-06", RevenueSource::Logs)
        .unwrap();
    assert_eq!(s.total_job_earnings, 55.0);
    assert_eq!(s.total_minimum_required, 160.0);
    assert_eq!(s.bonus_pool, -105.0);
    assert!(!s.is_compliant);
}

#[test]
fn weekly_summary_for_empty_crew_and_bad_dates() {
    let mut env = setup();
    let crew = env.crew("Empty");

    let s = weekly_crew_summary(&mut env.pool, &env.admin, &crew, "2025-01-06", RevenueSource::Legacy)
        .unwrap();
    assert!(s.workers.is_empty());
    assert_eq!(s.total_job_earnings, 0.0);
    assert!(s.is_compliant);

    let err = weekly_crew_summary(&mut env.pool, &env.admin, &crew, "2025-1-6", RevenueSource::Legacy)
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidDate(_)));
}

#[test]
fn weekly_summary_is_admin_only() {
    let mut env = setup();
    let crew = env.crew("Framing");
    let foreman = env.user("ben@example.com", Role::Foreman, Some(&crew), None);

    let err = weekly_crew_summary(&mut env.pool, &foreman, &crew, "2025-01-06", RevenueSource::Legacy)
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[test]
fn elevation_total_is_computed_by_the_store() {
    let mut env = setup();
    let (job, elevation) = env.job_with_elevation("Oak Ridge", 10.0, 5.5);

    let e = ElevationLogic::get(&mut env.pool, &env.admin, &elevation).unwrap();
    assert_eq!(e.total, 55.0);
    assert_eq!(e.job_id, job);

    let update = tradetracker::models::job::ElevationUpdate {
        yardage: Some(20.0),
        ..Default::default()
    };
    let e = ElevationLogic::update(&mut env.pool, &env.admin, &elevation, &update).unwrap();
    assert_eq!(e.total, 110.0);
}

#[test]
fn archive_and_reactivate_keep_elevations() {
    let mut env = setup();
    let crew = env.crew("Framing");
    let foreman = env.user("ben@example.com", Role::Foreman, Some(&crew), None);
    let (job, _) = env.job_with_elevation("Oak Ridge", 10.0, 5.5);

    JobTemplateLogic::archive(&mut env.pool, &env.admin, &job).unwrap();
    let visible = JobTemplateLogic::list(&mut env.pool, &foreman, true).unwrap();
    assert!(visible.is_empty());
    assert!(JobTemplateLogic::list(&mut env.pool, &foreman, false).is_err());

    let reactivated = JobTemplateLogic::reactivate(&mut env.pool, &env.admin, &job).unwrap();
    assert!(reactivated.active);
    let with = JobTemplateLogic::get(&mut env.pool, &foreman, &job).unwrap();
    assert_eq!(with.job_elevations.len(), 1);
}

#[test]
fn deleting_a_job_removes_elevations_and_logs() {
    let mut env = setup();
    let crew = env.crew("Framing");
    let foreman = env.user("ben@example.com", Role::Foreman, Some(&crew), None);
    let (job, elevation) = env.job_with_elevation("Oak Ridge", 10.0, 5.5);
    JobLogLogic::create(&mut env.pool, &foreman, &log_input(&job, &elevation, "2025-01-07")).unwrap();

    // referenced elevation cannot be removed on its own
    let err = ElevationLogic::delete(&mut env.pool, &env.admin, &elevation).unwrap_err();
    assert!(matches!(err, AppError::RecordInUse("elevation")));

    JobTemplateLogic::delete(&mut env.pool, &env.admin, &job).unwrap();

    let logs = JobLogLogic::list_all(&mut env.pool, &env.admin, &DateRange::default()).unwrap();
    assert!(logs.is_empty());
    let err = ElevationLogic::get(&mut env.pool, &env.admin, &elevation).unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}

#[test]
fn job_log_rules() {
    let mut env = setup();
    let crew = env.crew("Framing");
    let foreman = env.user("ben@example.com", Role::Foreman, Some(&crew), None);
    let loner = env.user("cal@example.com", Role::Foreman, None, None);
    let worker = env.user("ana@example.com", Role::Worker, Some(&crew), Some(20.0));
    let (job, elevation) = env.job_with_elevation("Oak Ridge", 10.0, 5.5);
    let (_, other_elevation) = env.job_with_elevation("Pine Hill", 1.0, 1.0);

    let err = JobLogLogic::create(&mut env.pool, &loner, &log_input(&job, &elevation, "2025-01-07"))
        .unwrap_err();
    assert!(matches!(err, AppError::NoCrewAssigned));

    let err = JobLogLogic::create(&mut env.pool, &worker, &log_input(&job, &elevation, "2025-01-07"))
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let err = JobLogLogic::create(
        &mut env.pool,
        &foreman,
        &log_input(&job, &other_elevation, "2025-01-07"),
    )
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));

    let mut missing_lot = log_input(&job, &elevation, "2025-01-07");
    missing_lot.lot = "   ".into();
    let err = JobLogLogic::create(&mut env.pool, &foreman, &missing_lot).unwrap_err();
    assert!(matches!(err, AppError::MissingField("lot")));

    let log = JobLogLogic::create(&mut env.pool, &foreman, &log_input(&job, &elevation, "2025-01-07"))
        .unwrap();
    assert_eq!(log.crew_id, crew);
    assert_eq!(log.total, 55.0);

    let stats = JobLogLogic::stats(&mut env.pool, &foreman, None, &DateRange::default()).unwrap();
    assert_eq!(stats.total_jobs, 1);
    assert_eq!(stats.total_yardage, 10.0);
    assert_eq!(stats.total_revenue, 55.0);

    let groups = JobLogLogic::grouped_by_job(&mut env.pool, &env.admin, &DateRange::default()).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].job_name, "Oak Ridge");
    assert_eq!(groups[0].total_revenue, 55.0);
}

#[test]
fn hours_validation_and_ownership() {
    let mut env = setup();
    let crew = env.crew("Framing");
    let ana = env.user("ana@example.com", Role::Worker, Some(&crew), Some(20.0));
    let ben = env.user("ben@example.com", Role::Worker, Some(&crew), Some(20.0));

    for bad in [0.0, -1.0, 24.5] {
        let input = HoursInput {
            date_worked: d("2025-01-06"),
            hours_worked: bad,
            notes: None,
        };
        let err = HoursLogic::submit(&mut env.pool, &ana, &input).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    env.hours(&ana, "2025-01-06", 24.0);
    let err = HoursLogic::submit(
        &mut env.pool,
        &ana,
        &HoursInput {
            date_worked: d("2025-01-06"),
            hours_worked: 2.0,
            notes: None,
        },
    )
    .unwrap_err();
    assert!(matches!(err, AppError::HoursAlreadySubmitted));

    let own = HoursLogic::list_own(&mut env.pool, &ana, &DateRange::default()).unwrap();
    let id = own[0].id.clone();

    let err = HoursLogic::delete(&mut env.pool, &ben, &id).unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let err = HoursLogic::list_all(&mut env.pool, &ana, &DateRange::default()).unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    HoursLogic::delete(&mut env.pool, &ana, &id).unwrap();
    assert!(HoursLogic::list_own(&mut env.pool, &ana, &DateRange::default())
        .unwrap()
        .is_empty());
}

#[test]
fn trade_in_use_and_user_creation_outcomes() {
    let mut env = setup();
    let trade = TradeLogic::create(
        &mut env.pool,
        &env.admin,
        &TradeInput {
            trade_name: "Concrete".into(),
            department_id: None,
            description: None,
        },
    )
    .unwrap();
    let crew = CrewLogic::create(
        &mut env.pool,
        &env.admin,
        &CrewInput {
            name: "Pour".into(),
            trade_id: Some(trade.id.clone()),
        },
    )
    .unwrap();
    assert_eq!(crew.trade_name.as_deref(), Some("Concrete"));

    let err = TradeLogic::delete(&mut env.pool, &env.admin, &trade.id).unwrap_err();
    assert!(matches!(err, AppError::TradeInUse));

    // profile step fails on an unknown crew: the account stays, with a warning
    let input = CreateUserInput {
        email: "dan@example.com".into(),
        password: PASSWORD.into(),
        first_name: "Dan".into(),
        last_name: "Ray".into(),
        phone_number: None,
        role: Role::Foreman,
        crew_id: Some("no-such-crew".into()),
        hourly_rate: None,
    };
    let outcome = UserLogic::create(&mut env.pool, &env.admin, &env.cfg, &input).unwrap();
    assert!(outcome.warning.is_some());
    assert_eq!(outcome.profile.role, Role::Worker);

    let err = UserLogic::create(&mut env.pool, &env.admin, &env.cfg, &input).unwrap_err();
    assert!(matches!(err, AppError::EmailTaken(_)));
}

#[test]
fn sessions_and_credentials() {
    let mut env = setup();

    let err = AuthLogic::login(&mut env.pool, &env.cfg, "admin@example.com", "wrong-pass").unwrap_err();
    assert!(matches!(err, AppError::InvalidCredentials));

    // email lookup ignores case
    let again = AuthLogic::login(&mut env.pool, &env.cfg, "ADMIN@example.com", PASSWORD).unwrap();
    assert!(again.is_admin());

    AuthLogic::logout(&mut env.pool, &again).unwrap();
    let err = AuthLogic::resolve(&mut env.pool, &again.token).unwrap_err();
    assert!(matches!(err, AppError::NotAuthenticated));

    // the first session is unaffected
    assert!(AuthLogic::resolve(&mut env.pool, &env.admin.token).is_ok());
}

#[test]
fn unusable_session_lifetime_is_rejected() {
    let mut env = setup();

    for ttl in [i64::MAX, 0, -5] {
        env.cfg.session_ttl_hours = ttl;
        let err = AuthLogic::login(&mut env.pool, &env.cfg, "admin@example.com", PASSWORD).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)), "ttl {ttl}");
    }

    env.cfg.session_ttl_hours = 1;
    assert!(AuthLogic::login(&mut env.pool, &env.cfg, "admin@example.com", PASSWORD).is_ok());
}
