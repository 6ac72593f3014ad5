/// Facility kind value meaning "do not filter by kind".
pub const ALL_KINDS: &str = "전체";

/// Facility kinds offered to users, sentinel first.
pub const FACILITY_KINDS: &[&str] = &[
    ALL_KINDS,
    "엘리베이터",
    "에스컬레이터",
    "화장실",
    "수유실",
    "물품보관함",
];

pub mod cache {

    pub const DEFAULT_TTL_SECONDS: u64 = 600;
}

pub mod recent {

    pub const WINDOW_HOURS: i64 = 24;
}

pub mod status {

    pub const DEFAULT_OPERATIONAL_TOKENS: &[&str] = &["M", "정상", "Y", "구동중"];
}
