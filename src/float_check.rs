//! Rejects non-finite floats before a value is turned into JSON.
//!
//! `serde_json` writes `NaN` and infinities as `null`, which would silently change a
//! property bag. Walking the value with this serializer first catches them.

use std::fmt::Display;

use serde::ser::{self, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum FloatCheckError {
	#[error("non-finite number {0} has no JSON representation")]
	NonFinite(f64),
	#[error("{0}")]
	Custom(String),
}

impl ser::Error for FloatCheckError {
	fn custom<T: Display>(msg: T) -> Self {
		Self::Custom(msg.to_string())
	}
}

/// Fails on the first `f32`/`f64` in `value` that is NaN or infinite.
pub(crate) fn ensure_finite<T: Serialize + ?Sized>(value: &T) -> Result<(), FloatCheckError> {
	value.serialize(FloatCheck)
}

#[derive(Clone, Copy)]
struct FloatCheck;

type Check = Result<(), FloatCheckError>;

macro_rules! accept {
	($($method:ident($ty:ty)),* $(,)?) => {
		$(fn $method(self, _v: $ty) -> Check {
			Ok(())
		})*
	};
}

impl ser::Serializer for FloatCheck {
	type Ok = ();
	type Error = FloatCheckError;
	type SerializeSeq = Self;
	type SerializeTuple = Self;
	type SerializeTupleStruct = Self;
	type SerializeTupleVariant = Self;
	type SerializeMap = Self;
	type SerializeStruct = Self;
	type SerializeStructVariant = Self;

	accept!(
		serialize_bool(bool),
		serialize_i8(i8),
		serialize_i16(i16),
		serialize_i32(i32),
		serialize_i64(i64),
		serialize_i128(i128),
		serialize_u8(u8),
		serialize_u16(u16),
		serialize_u32(u32),
		serialize_u64(u64),
		serialize_u128(u128),
		serialize_char(char),
		serialize_str(&str),
		serialize_bytes(&[u8]),
	);

	fn serialize_f32(self, v: f32) -> Check {
		self.serialize_f64(v as f64)
	}

	fn serialize_f64(self, v: f64) -> Check {
		if v.is_finite() {
			Ok(())
		} else {
			Err(FloatCheckError::NonFinite(v))
		}
	}

	fn serialize_none(self) -> Check {
		Ok(())
	}

	fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Check {
		value.serialize(self)
	}

	fn serialize_unit(self) -> Check {
		Ok(())
	}

	fn serialize_unit_struct(self, _name: &'static str) -> Check {
		Ok(())
	}

	fn serialize_unit_variant(self, _name: &'static str, _index: u32, _variant: &'static str) -> Check {
		Ok(())
	}

	fn serialize_newtype_struct<T: Serialize + ?Sized>(self, _name: &'static str, value: &T) -> Check {
		value.serialize(self)
	}

	fn serialize_newtype_variant<T: Serialize + ?Sized>(
		self,
		_name: &'static str,
		_index: u32,
		_variant: &'static str,
		value: &T,
	) -> Check {
		value.serialize(self)
	}

	fn serialize_seq(self, _len: Option<usize>) -> Result<Self, FloatCheckError> {
		Ok(self)
	}

	fn serialize_tuple(self, _len: usize) -> Result<Self, FloatCheckError> {
		Ok(self)
	}

	fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<Self, FloatCheckError> {
		Ok(self)
	}

	fn serialize_tuple_variant(
		self,
		_name: &'static str,
		_index: u32,
		_variant: &'static str,
		_len: usize,
	) -> Result<Self, FloatCheckError> {
		Ok(self)
	}

	fn serialize_map(self, _len: Option<usize>) -> Result<Self, FloatCheckError> {
		Ok(self)
	}

	fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self, FloatCheckError> {
		Ok(self)
	}

	fn serialize_struct_variant(
		self,
		_name: &'static str,
		_index: u32,
		_variant: &'static str,
		_len: usize,
	) -> Result<Self, FloatCheckError> {
		Ok(self)
	}
}

impl ser::SerializeSeq for FloatCheck {
	type Ok = ();
	type Error = FloatCheckError;

	fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Check {
		value.serialize(*self)
	}

	fn end(self) -> Check {
		Ok(())
	}
}

impl ser::SerializeTuple for FloatCheck {
	type Ok = ();
	type Error = FloatCheckError;

	fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Check {
		value.serialize(*self)
	}

	fn end(self) -> Check {
		Ok(())
	}
}

impl ser::SerializeTupleStruct for FloatCheck {
	type Ok = ();
	type Error = FloatCheckError;

	fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Check {
		value.serialize(*self)
	}

	fn end(self) -> Check {
		Ok(())
	}
}

impl ser::SerializeTupleVariant for FloatCheck {
	type Ok = ();
	type Error = FloatCheckError;

	fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Check {
		value.serialize(*self)
	}

	fn end(self) -> Check {
		Ok(())
	}
}

impl ser::SerializeMap for FloatCheck {
	type Ok = ();
	type Error = FloatCheckError;

	fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Check {
		key.serialize(*self)
	}

	fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Check {
		value.serialize(*self)
	}

	fn end(self) -> Check {
		Ok(())
	}
}

impl ser::SerializeStruct for FloatCheck {
	type Ok = ();
	type Error = FloatCheckError;

	fn serialize_field<T: Serialize + ?Sized>(&mut self, _key: &'static str, value: &T) -> Check {
		value.serialize(*self)
	}

	fn end(self) -> Check {
		Ok(())
	}
}

impl ser::SerializeStructVariant for FloatCheck {
	type Ok = ();
	type Error = FloatCheckError;

	fn serialize_field<T: Serialize + ?Sized>(&mut self, _key: &'static str, value: &T) -> Check {
		value.serialize(*self)
	}

	fn end(self) -> Check {
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeMap;

	use serde_json::json;

	use super::*;

	#[test]
	fn finite_values_pass() {
		assert!(ensure_finite(&json!({"a": [1.5, -2, null], "b": {"c": "x"}})).is_ok());
		assert!(ensure_finite(&(1u8, 2.5f32, Some(f64::MAX))).is_ok());
	}

	#[test]
	fn nested_non_finite_values_fail() {
		let mut inner = BTreeMap::new();
		inner.insert("deep", vec![0.0, f64::INFINITY]);
		assert!(matches!(
			ensure_finite(&inner),
			Err(FloatCheckError::NonFinite(v)) if v == f64::INFINITY
		));
		assert!(ensure_finite(&Some(f32::NAN)).is_err());
		assert!(ensure_finite(&[f64::NEG_INFINITY]).is_err());
	}
}
