//! # Document Model
//!
//! Typed shapes for the documents the dashboard keeps under its well-known
//! keys. Field names serialize in camelCase so documents written by older
//! front-ends load unchanged. Optional fields default when absent.
//!
//! Each shape is bound to its key by a [`DocKey`] constant in [`keys`], and
//! registered for validation in [`crate::schema`].

use crate::key::DocKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Minutes in the reference work day used for "percent of day" figures.
pub const WORKDAY_MINUTES: u32 = 480;

pub mod keys {
    use super::*;

    pub const TODOS: DocKey<Vec<Todo>> = DocKey::new("todos");
    pub const CALENDAR_EVENTS: DocKey<Vec<CalendarEvent>> = DocKey::new("calendar-events");
    pub const REMINDERS: DocKey<Vec<Reminder>> = DocKey::new("reminders");
    pub const SCHEDULER_EVENTS: DocKey<Vec<SchedulerEvent>> = DocKey::new("scheduler-events");
    pub const YOUTUBE_LINKS: DocKey<Vec<YoutubeLink>> = DocKey::new("youtube-links");
    pub const DAILY_FOCUS: DocKey<DailyFocus> = DocKey::new("daily-focus");
    pub const APP_SETTINGS: DocKey<AppSettings> = DocKey::new("app-settings");
    pub const POMODORO_SETTINGS: DocKey<PomodoroSettings> = DocKey::new("pomodoro-settings");
    pub const POMODORO_HISTORY: DocKey<PomodoroHistory> = DocKey::new("pomodoro-history");
    pub const DASHBOARD_DATA: DocKey<DashboardData> = DocKey::new("dashboard-data");
    pub const TIME_TRACKING_ACTIVITIES: DocKey<Vec<Activity>> =
        DocKey::new("time-tracking-activities");
    pub const CURRENT_ACTIVITY: DocKey<Option<CurrentActivity>> = DocKey::new("current-activity");
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Todo {
    pub fn new(text: impl Into<String>, priority: Priority) -> Self {
        Self {
            id: new_id(),
            text: text.into(),
            completed: false,
            priority,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    /// Calendar date as entered, e.g. `2024-05-01`.
    pub date: String,
    #[serde(default)]
    pub time: String,
    /// Minutes.
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: String,
    pub title: String,
    pub date_time: DateTime<Utc>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Reminder {
    pub fn new(title: impl Into<String>, date_time: DateTime<Utc>, priority: Priority) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            date_time,
            priority,
            notes: String::new(),
            completed: false,
            created_at: Utc::now(),
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.date_time <= now
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerEvent {
    pub id: String,
    pub title: String,
    /// Local date-time as entered (`2024-05-01T09:30`), no zone.
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YoutubeLink {
    pub id: String,
    pub url: String,
    pub video_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl YoutubeLink {
    /// Build a link from a pasted URL. Returns `None` when no video id can be
    /// extracted.
    pub fn from_url(url: &str, title: impl Into<String>) -> Option<Self> {
        let video_id = extract_video_id(url)?;
        Some(Self {
            id: new_id(),
            url: url.to_string(),
            video_id,
            title: title.into(),
            created_at: Utc::now(),
        })
    }

    pub fn thumbnail_url(&self) -> String {
        format!("https://img.youtube.com/vi/{}/0.jpg", self.video_id)
    }
}

const VIDEO_ID_LEN: usize = 11;
const VIDEO_ID_MARKERS: [&str; 6] = ["youtu.be/", "v/", "embed/", "shorts/", "watch?v=", "&v="];

/// Pull the 11-character video id out of the common YouTube URL forms.
/// The marker appearing last in the URL wins.
pub fn extract_video_id(url: &str) -> Option<String> {
    let start = VIDEO_ID_MARKERS
        .iter()
        .filter_map(|m| url.rfind(m).map(|pos| pos + m.len()))
        .chain(user_marker_end(url))
        .max()?;
    let id: String = url[start..]
        .chars()
        .take_while(|c| !matches!(c, '#' | '&' | '?'))
        .collect();
    (id.chars().count() == VIDEO_ID_LEN).then_some(id)
}

/// End of the last `u/<c>/` marker, where `<c>` is one word character.
fn user_marker_end(url: &str) -> Option<usize> {
    url.match_indices("u/")
        .filter_map(|(pos, _)| {
            let mut rest = url[pos + 2..].chars();
            let c = rest.next()?;
            let word = c.is_ascii_alphanumeric() || c == '_';
            (word && rest.next() == Some('/')).then_some(pos + 4)
        })
        .last()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusTask {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl FocusTask {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            text: text.into(),
            completed: false,
            created_at: Utc::now(),
        }
    }
}

/// The task list for a single day. A list for another date is stale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyFocus {
    /// `yyyy-MM-dd`; empty when never set.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub tasks: Vec<FocusTask>,
}

impl DailyFocus {
    pub fn for_date(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            tasks: Vec::new(),
        }
    }

    /// Keep this list if it belongs to `date`, otherwise start a fresh one.
    pub fn roll_over(self, date: &str) -> Self {
        if self.date == date {
            self
        } else {
            Self::for_date(date)
        }
    }

    /// Completed share of tasks, rounded to a whole percent.
    pub fn progress(&self) -> u32 {
        if self.tasks.is_empty() {
            return 0;
        }
        let done = self.tasks.iter().filter(|t| t.completed).count();
        percent(done as f64, self.tasks.len() as f64)
    }
}

/// Application preferences. Keys this crate does not know are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PomodoroSettings {
    pub pomodoro_time: u32,
    pub short_break_time: u32,
    pub long_break_time: u32,
    pub auto_start_breaks: bool,
    pub auto_start_pomodoros: bool,
    pub long_break_interval: u32,
    pub alarm_sound: String,
    pub alarm_volume: u8,
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            pomodoro_time: 25,
            short_break_time: 5,
            long_break_time: 15,
            auto_start_breaks: false,
            auto_start_pomodoros: false,
            long_break_interval: 4,
            alarm_sound: "bell".to_string(),
            alarm_volume: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroEntry {
    pub date: DateTime<Utc>,
    pub task: String,
    /// Minutes.
    pub duration: u32,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PomodoroHistory {
    pub completed_pomodoros: u32,
    pub history: Vec<PomodoroEntry>,
}

impl PomodoroHistory {
    pub fn record(&mut self, entry: PomodoroEntry) {
        self.completed_pomodoros += 1;
        self.history.push(entry);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskBreakdown {
    pub name: String,
    /// `"<h>h <m>m"`.
    pub time: String,
    pub percent: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardData {
    pub date: String,
    /// `"<h>h <m>m"`.
    pub total_worked: String,
    pub percent_of_day: u32,
    pub task_breakdown: Vec<TaskBreakdown>,
}

impl DashboardData {
    pub fn for_date(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            total_worked: format_hm(0),
            percent_of_day: 0,
            task_breakdown: Vec::new(),
        }
    }

    /// Add worked minutes to the day total and to one category.
    /// Unparseable totals restart from zero.
    pub fn add_minutes(&mut self, category: &str, minutes: u32) {
        let total = parse_hm(&self.total_worked)
            .unwrap_or(0)
            .saturating_add(minutes);
        self.total_worked = format_hm(total);
        self.percent_of_day = percent(total as f64, WORKDAY_MINUTES as f64).min(100);

        match self.task_breakdown.iter_mut().find(|t| t.name == category) {
            Some(task) => {
                // An entry whose time does not parse is left untouched
                if let Some(current) = parse_hm(&task.time) {
                    let updated = current.saturating_add(minutes);
                    task.time = format_hm(updated);
                    task.percent = percent(updated as f64, WORKDAY_MINUTES as f64);
                }
            }
            None => self.task_breakdown.push(TaskBreakdown {
                name: category.to_string(),
                time: format_hm(minutes),
                percent: percent(minutes as f64, WORKDAY_MINUTES as f64),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub description: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Seconds.
    pub duration: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentActivity {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub description: String,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub is_active: bool,
}

impl CurrentActivity {
    pub fn start(name: impl Into<String>, category_id: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            category_id: category_id.into(),
            description: String::new(),
            start_time: Utc::now(),
            is_active: true,
        }
    }

    /// Close the running activity into a completed [`Activity`].
    pub fn stop(self, end_time: DateTime<Utc>) -> Activity {
        let duration = (end_time - self.start_time).num_seconds().max(0);
        Activity {
            id: new_id(),
            name: self.name,
            category_id: self.category_id,
            description: self.description,
            start_time: self.start_time,
            end_time,
            duration,
        }
    }
}

fn percent(part: f64, whole: f64) -> u32 {
    ((part / whole) * 100.0).round() as u32
}

/// Parse `"3h 25m"` into minutes. Totals that overflow `u32` do not parse.
pub fn parse_hm(text: &str) -> Option<u32> {
    let (hours, rest) = text.trim().split_once('h')?;
    let minutes = rest.trim().strip_suffix('m')?;
    let hours: u32 = hours.trim().parse().ok()?;
    let minutes: u32 = minutes.trim().parse().ok()?;
    hours.checked_mul(60)?.checked_add(minutes)
}

pub fn format_hm(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn todo_reads_front_end_shape() {
        let doc = json!({
            "id": "1",
            "text": "a",
            "completed": false,
            "priority": "high",
            "createdAt": "2024-03-01T10:00:00.000Z"
        });
        let todo: Todo = serde_json::from_value(doc).unwrap();
        assert_eq!(todo.priority, Priority::High);
        assert_eq!(
            todo.created_at,
            Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn todo_fills_missing_optional_fields() {
        let todo: Todo = serde_json::from_value(json!({"id": "1", "text": "a"})).unwrap();
        assert!(!todo.completed);
        assert_eq!(todo.priority, Priority::Medium);
    }

    #[test]
    fn todo_serializes_camel_case() {
        let value = serde_json::to_value(Todo::new("write docs", Priority::Low)).unwrap();
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["priority"], "low");
    }

    #[test]
    fn extracts_video_ids() {
        let id = Some("dQw4w9WgXcQ".to_string());
        assert_eq!(extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), id);
        assert_eq!(extract_video_id("https://youtu.be/dQw4w9WgXcQ?t=42"), id);
        assert_eq!(extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ"), id);
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ#t=1"),
            id
        );
        assert_eq!(extract_video_id("https://www.youtube.com/shorts/dQw4w9WgXcQ"), id);
        assert_eq!(
            extract_video_id("https://www.youtube.com/user/someone#p/u/1/dQw4w9WgXcQ"),
            id
        );
    }

    #[test]
    fn rejects_urls_without_valid_id() {
        assert_eq!(extract_video_id("https://example.com/page"), None);
        assert_eq!(extract_video_id("https://youtu.be/short"), None);
    }

    #[test]
    fn youtube_link_from_url() {
        let link = YoutubeLink::from_url("https://youtu.be/dQw4w9WgXcQ", "Video 1").unwrap();
        assert_eq!(link.video_id, "dQw4w9WgXcQ");
        assert_eq!(
            link.thumbnail_url(),
            "https://img.youtube.com/vi/dQw4w9WgXcQ/0.jpg"
        );
        assert!(YoutubeLink::from_url("not a url", "x").is_none());
    }

    #[test]
    fn daily_focus_rolls_over_to_new_day() {
        let mut focus = DailyFocus::for_date("2024-05-01");
        focus.tasks.push(FocusTask::new("ship it"));

        let same = focus.clone().roll_over("2024-05-01");
        assert_eq!(same.tasks.len(), 1);

        let next = focus.roll_over("2024-05-02");
        assert_eq!(next.date, "2024-05-02");
        assert!(next.tasks.is_empty());
    }

    #[test]
    fn daily_focus_progress_rounds() {
        let mut focus = DailyFocus::for_date("2024-05-01");
        assert_eq!(focus.progress(), 0);
        for i in 0..3 {
            let mut task = FocusTask::new(format!("t{i}"));
            task.completed = i == 0;
            focus.tasks.push(task);
        }
        assert_eq!(focus.progress(), 33);
    }

    #[test]
    fn app_settings_keeps_unknown_keys() {
        let doc = json!({"darkMode": true, "accent": "teal"});
        let settings: AppSettings = serde_json::from_value(doc.clone()).unwrap();
        assert_eq!(settings.dark_mode, Some(true));
        assert_eq!(serde_json::to_value(&settings).unwrap(), doc);
    }

    #[test]
    fn pomodoro_settings_default_missing_fields() {
        let settings: PomodoroSettings =
            serde_json::from_value(json!({"pomodoroTime": 50})).unwrap();
        assert_eq!(settings.pomodoro_time, 50);
        assert_eq!(settings.short_break_time, 5);
        assert_eq!(settings.alarm_sound, "bell");
    }

    #[test]
    fn pomodoro_history_counts_records() {
        let mut history = PomodoroHistory::default();
        history.record(PomodoroEntry {
            date: Utc::now(),
            task: "Unnamed task".into(),
            duration: 25,
            category: "Work".into(),
        });
        assert_eq!(history.completed_pomodoros, 1);
        assert_eq!(history.history.len(), 1);
    }

    #[test]
    fn hm_parsing() {
        assert_eq!(parse_hm("0h 0m"), Some(0));
        assert_eq!(parse_hm("2h 15m"), Some(135));
        assert_eq!(parse_hm("garbage"), None);
        assert_eq!(format_hm(135), "2h 15m");
    }

    #[test]
    fn dashboard_accumulates_minutes() {
        let mut data = DashboardData::for_date("5/1/2024");
        data.add_minutes("Focus", 25);
        data.add_minutes("Focus", 50);

        assert_eq!(data.total_worked, "1h 15m");
        assert_eq!(data.percent_of_day, 16);
        assert_eq!(data.task_breakdown.len(), 1);
        assert_eq!(data.task_breakdown[0].time, "1h 15m");
        assert_eq!(data.task_breakdown[0].percent, 16);
    }

    #[test]
    fn dashboard_percent_of_day_caps_at_100() {
        let mut data = DashboardData::for_date("5/1/2024");
        data.add_minutes("Focus", 600);
        assert_eq!(data.percent_of_day, 100);
        assert_eq!(data.task_breakdown[0].percent, 125);
    }

    #[test]
    fn hm_parsing_rejects_overflow() {
        assert_eq!(parse_hm("99999999h 0m"), None);
        assert_eq!(parse_hm("71582788h 16m"), None);
        assert_eq!(parse_hm("71582788h 0m"), Some(71582788 * 60));
    }

    #[test]
    fn dashboard_add_minutes_saturates_huge_totals() {
        let mut data = DashboardData::for_date("5/1/2024");
        data.total_worked = "71582788h 0m".to_string();
        data.task_breakdown.push(TaskBreakdown {
            name: "Focus".to_string(),
            time: "71582788h 0m".to_string(),
            percent: 0,
        });

        data.add_minutes("Focus", 25);
        assert_eq!(data.total_worked, format_hm(u32::MAX));
        assert_eq!(data.task_breakdown[0].time, format_hm(u32::MAX));
        assert_eq!(data.percent_of_day, 100);

        // A total too large to parse restarts from zero
        data.total_worked = "99999999h 0m".to_string();
        data.add_minutes("Break", 5);
        assert_eq!(data.total_worked, "0h 5m");
    }

    #[test]
    fn current_activity_keeps_its_id() {
        let started = CurrentActivity::start("Deep work", "focus");
        assert!(!started.id.is_empty());

        let raw = json!({
            "id": "act-1",
            "name": "Reading",
            "categoryId": "learning",
            "description": "",
            "startTime": "2024-05-01T09:00:00Z",
            "isActive": true
        });
        let current: CurrentActivity = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(current.id, "act-1");
        assert_eq!(serde_json::to_value(&current).unwrap(), raw);

        let legacy: CurrentActivity = serde_json::from_value(json!({
            "name": "Reading",
            "startTime": "2024-05-01T09:00:00Z"
        }))
        .unwrap();
        assert_eq!(legacy.id, "");
    }

    #[test]
    fn activity_stop_computes_duration() {
        let mut current = CurrentActivity::start("Deep work", "focus");
        current.start_time = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let done = current.stop(Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 5).unwrap());
        assert_eq!(done.duration, 1805);
        assert_eq!(done.category_id, "focus");
    }

    #[test]
    fn reminder_due_only_when_open_and_past() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let mut reminder = Reminder::new("call", at, Priority::High);
        assert!(reminder.is_due(at));
        assert!(!reminder.is_due(at - chrono::Duration::minutes(1)));
        reminder.completed = true;
        assert!(!reminder.is_due(at));
    }
}
