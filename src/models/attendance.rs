use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Mapeia o CREATE TYPE attendance_status do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "attendance_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    OnTime,
    Late,
    HalfDay,
    Absent,
    Weekend,
}

// Um registro por (usuário, data do turno). O primeiro check-in vence;
// depois disso só o check-out pode mudar.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub check_in_time: DateTime<Utc>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub status: AttendanceStatus,
    pub is_approved: bool,
}

// Resultado de um check-in (explícito ou via login).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceResult {
    pub record: Option<AttendanceRecord>,
    pub status: AttendanceStatus,
    pub minutes_late: i64,
    // true quando o registro já existia (logins subsequentes do mesmo turno)
    pub already_recorded: bool,
    pub message: String,
}

// Linha reduzida usada pela agregação de salário.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AttendanceDay {
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}
