pub(crate) mod date;
pub(crate) mod timezone;

pub(crate) use date::parse_played_at;
pub(crate) use timezone::Timezone;
