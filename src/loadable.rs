//! State of one result section as seen by its panel.

/// A result field that is being fetched, has arrived, or was not delivered.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Loadable<T> {
	/// A query is in flight.
	Loading,
	/// The field arrived.
	Ready(T),
	/// No query yet, or the answer did not include the field.
	#[default]
	Absent,
}

impl<T> Loadable<T> {
	/// Project one field of an optional response.
	///
	/// While `loading` every panel shows its placeholder, even if an older
	/// response is still around.
	pub fn project<R>(
		loading: bool,
		response: Option<&R>,
		field: impl FnOnce(&R) -> Option<T>,
	) -> Self {
		if loading {
			return Loadable::Loading;
		}
		response.and_then(field).map_or(Loadable::Absent, Loadable::Ready)
	}

	/// `Some` only when ready.
	pub fn ready(&self) -> Option<&T> {
		match self {
			Loadable::Ready(value) => Some(value),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	struct Resp {
		audio: Option<String>,
	}

	#[test]
	fn loading_overrides_any_response() {
		let old = Resp {
			audio: Some("a.wav".into()),
		};
		let state = Loadable::project(true, Some(&old), |r| r.audio.clone());
		assert_eq!(state, Loadable::Loading);
		assert_eq!(state.ready(), None);
	}

	#[test]
	fn present_field_is_ready_and_missing_is_absent() {
		let with = Resp {
			audio: Some("a.wav".into()),
		};
		let without = Resp { audio: None };
		assert_eq!(
			Loadable::project(false, Some(&with), |r| r.audio.clone()),
			Loadable::Ready("a.wav".to_string())
		);
		assert_eq!(
			Loadable::project(false, Some(&without), |r| r.audio.clone()),
			Loadable::Absent
		);
		assert_eq!(
			Loadable::project(false, None::<&Resp>, |r| r.audio.clone()),
			Loadable::Absent
		);
	}

	#[test]
	fn only_ready_exposes_a_value() {
		assert_eq!(Loadable::Ready(2).ready(), Some(&2));
		assert_eq!(Loadable::<i32>::Loading.ready(), None);
		assert_eq!(Loadable::<i32>::Absent.ready(), None);
	}
}
