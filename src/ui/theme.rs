//! Shared class strings so pages stay visually consistent.

pub const BTN_PRIMARY: &str =
    "rounded-lg bg-emerald-600 px-4 py-2 text-sm font-semibold text-white hover:bg-emerald-500";
pub const BTN_SECONDARY: &str =
    "rounded-lg border border-slate-300 bg-white px-4 py-2 text-sm font-semibold text-slate-600 hover:bg-slate-50";
pub const BTN_DANGER: &str =
    "rounded-lg border border-rose-300 bg-rose-50 px-4 py-2 text-sm font-semibold text-rose-600 hover:bg-rose-100";
pub const BTN_LINK: &str =
    "text-xs font-semibold uppercase tracking-wide text-emerald-700 hover:text-emerald-500";

pub const INPUT: &str = "mt-1 w-full rounded-lg border border-slate-300 bg-white px-3 py-2 text-sm text-slate-800 focus:border-emerald-500 focus:outline-none";
pub const LABEL: &str = "block text-xs font-semibold uppercase text-slate-500";

pub const PANEL: &str = "rounded-xl border border-slate-200 bg-white shadow-sm";
pub const PANEL_PAD: &str = "rounded-xl border border-slate-200 bg-white p-4 shadow-sm";

pub const TABLE_CONTAINER: &str =
    "rounded-xl border border-slate-200 bg-white shadow-sm overflow-hidden";
pub const TABLE_HEADER: &str =
    "border-b border-slate-200 bg-slate-50 text-xs uppercase text-slate-500";
pub const TABLE_DIVIDER: &str = "divide-y divide-slate-100";

pub const TEXT_MUTED: &str = "text-slate-500";
pub const TEXT_RISING: &str = "text-emerald-600";
pub const TEXT_FALLING: &str = "text-rose-600";
pub const TEXT_FLAT: &str = "text-slate-400";

pub fn trend_text(trend: crate::domain::entities::Trend) -> &'static str {
    use crate::domain::entities::Trend;
    match trend {
        Trend::Rising => TEXT_RISING,
        Trend::Falling => TEXT_FALLING,
        Trend::Flat => TEXT_FLAT,
    }
}
