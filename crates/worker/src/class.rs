/// What a spawned session task does, recorded on its tracing span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskClass {
	/// Off-screen resolution of candidate sources.
	Probe,
	/// One-shot timers such as the fallback deadline.
	Timer,
}

impl TaskClass {
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Probe => "probe",
			Self::Timer => "timer",
		}
	}
}
