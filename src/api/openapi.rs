//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, checkin, health, reports, settings, stats, system_logs, visitors, visits, ws};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Karibu API",
        version = "1.0.0",
        description = "Visitor Check-in Management System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "Karibu Team", email = "dev@karibu-app.org")
    ),
    servers(
        (url = "/api", description = "API root")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Kiosk
        checkin::check_in,
        checkin::check_out,
        // Auth
        auth::login,
        auth::logout,
        auth::me,
        // Visitors
        visitors::list_visitors,
        visitors::get_visitor,
        visitors::update_visitor,
        visitors::verify_visitor,
        visitors::list_trash,
        visitors::delete_visitor,
        visitors::restore_visitor,
        visitors::permanently_delete_visitor,
        visitors::empty_bin,
        // Visits
        visits::list_visits,
        visits::check_out_visitor,
        visits::auto_checkout,
        visits::set_visit_partner,
        // Reports
        reports::list_reports,
        reports::list_visitor_reports,
        reports::get_report,
        reports::create_report,
        reports::update_report,
        // Stats
        stats::get_stats,
        // System logs
        system_logs::list_system_logs,
        // Settings
        settings::get_settings,
        settings::update_settings,
        // Notifications
        ws::check_in_events,
    ),
    components(
        schemas(
            // Kiosk
            checkin::CheckInResponse,
            crate::models::visitor::CheckInRequest,
            crate::models::visit::CheckOutRequest,
            // Auth
            crate::models::admin::LoginRequest,
            auth::LoginResponse,
            auth::LogoutResponse,
            auth::AdminInfo,
            // Visitors
            crate::models::visitor::Visitor,
            crate::models::visitor::Sex,
            crate::models::visitor::UpdateVisitor,
            crate::models::visitor::VisitorQuery,
            crate::models::visitor::VerifyVisitorRequest,
            visitors::VisitorsListResponse,
            visitors::EmptyBinResponse,
            // Visits
            crate::models::visit::Visit,
            crate::models::visit::VisitDetails,
            crate::models::visit::VisitQuery,
            crate::models::visit::SetPartnerRequest,
            visits::VisitsListResponse,
            visits::AutoCheckoutResponse,
            // Reports
            crate::models::report::VisitorReport,
            crate::models::report::ReportSeverity,
            crate::models::report::ReportStatus,
            crate::models::report::CreateReport,
            crate::models::report::UpdateReport,
            crate::models::report::ReportQuery,
            // Stats
            stats::StatsResponse,
            stats::VisitorStats,
            stats::VisitStats,
            stats::ReportStats,
            // System logs
            crate::models::system_log::SystemLog,
            crate::models::system_log::SystemLogQuery,
            system_logs::SystemLogsListResponse,
            // Settings
            crate::models::settings::Settings,
            crate::models::settings::UpdateSettings,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "kiosk", description = "Public kiosk check-in/check-out"),
        (name = "auth", description = "Admin authentication"),
        (name = "visitors", description = "Visitor management"),
        (name = "visits", description = "Visit management"),
        (name = "reports", description = "Visitor incident reports"),
        (name = "stats", description = "Dashboard statistics"),
        (name = "system-logs", description = "Audit trail"),
        (name = "settings", description = "System settings"),
        (name = "notifications", description = "Live check-in notifications")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
