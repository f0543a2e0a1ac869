//! Post-parse rewrite of recognised `::TypeName(...)` custom values into
//! concrete fixed-width integers. Ported from
//! `handle_known_custom_types`/`handle_int` in `src/parser/custom_types.c`.

use crate::error::Error;
use crate::numeric;
use crate::position::Position;
use crate::value::{Custom, Value};

/// Dispatches on `custom.name`. Recognised names are replaced in place by
/// the coerced integer value; anything else is handed back unchanged as
/// `Value::Custom` for the host to interpret.
pub fn rewrite(custom: Custom, pos: Position) -> Result<Value, Error> {
    let name = custom.name.as_str();
    let kind = match name {
        "::Integer" => Kind::Integer,
        "::Int8" => Kind::Int8,
        "::Uint8" => Kind::Uint8,
        "::Int16" => Kind::Int16,
        "::Uint16" => Kind::Uint16,
        "::Int32" => Kind::Int32,
        "::Uint32" => Kind::Uint32,
        "::Int64" => Kind::Int64,
        "::Uint64" => Kind::Uint64,
        _ => return Ok(Value::Custom(custom)),
    };

    let (text, base) = extract_args(&custom, pos)?;
    coerce(kind, text, base, pos)
}

enum Kind {
    Integer,
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Uint64,
}

fn extract_args(custom: &Custom, pos: Position) -> Result<(&str, u32), Error> {
    if custom.args.is_empty() || custom.args.len() > 2 {
        return Err(Error::OptIntArgCount(pos));
    }

    let text = match &custom.args[0] {
        Value::String(s) => s.as_str(),
        _ => return Err(Error::OptIntArg0NotString(pos)),
    };

    let base = if custom.args.len() == 2 {
        match &custom.args[1] {
            // A negative base is out of range, not a type error -- let
            // `numeric::magnitude`'s own `2..=36` check reject it as
            // `StrToIntBase`.
            Value::Integer(i) => *i as u32,
            _ => return Err(Error::OptIntArg1NotInt(pos)),
        }
    } else {
        0
    };

    // The numeric text must be pure ASCII and free of embedded NULs before
    // it reaches the coercer (spec.md §4.7).
    let as_utf8 = match &custom.args[0] {
        Value::String(s) => s,
        _ => unreachable!(),
    };
    if !as_utf8.is_ascii() || as_utf8.has_embedded_nul() {
        return Err(Error::StrToIntChar(pos));
    }

    Ok((text, base))
}

fn coerce(kind: Kind, text: &str, base: u32, pos: Position) -> Result<Value, Error> {
    Ok(match kind {
        Kind::Integer => Value::Integer(numeric::coerce_i32(text, base, pos)?),
        Kind::Int8 => Value::Int8(numeric::coerce_i8(text, base, pos)?),
        Kind::Uint8 => Value::Uint8(numeric::coerce_u8(text, base, pos)?),
        Kind::Int16 => Value::Int16(numeric::coerce_i16(text, base, pos)?),
        Kind::Uint16 => Value::Uint16(numeric::coerce_u16(text, base, pos)?),
        Kind::Int32 => Value::Int32(numeric::coerce_i32(text, base, pos)?),
        Kind::Uint32 => Value::Uint32(numeric::coerce_u32(text, base, pos)?),
        Kind::Int64 => Value::Int64(numeric::coerce_i64(text, base, pos)?),
        Kind::Uint64 => Value::Uint64(numeric::coerce_u64(text, base, pos)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Utf8String;
    use alloc::vec;

    fn p() -> Position {
        Position::origin()
    }

    #[test]
    fn rewrites_uint8() {
        let custom = Custom {
            name: Utf8String::from("::Uint8"),
            args: vec![Value::String(Utf8String::from("255"))],
        };
        assert_eq!(rewrite(custom, p()), Ok(Value::Uint8(255)));
    }

    #[test]
    fn rewrites_int8_with_explicit_base() {
        let custom = Custom {
            name: Utf8String::from("::Int8"),
            args: vec![
                Value::String(Utf8String::from("-0x80")),
                Value::Integer(0),
            ],
        };
        assert_eq!(rewrite(custom, p()), Ok(Value::Int8(-128)));
    }

    #[test]
    fn unknown_name_is_left_alone() {
        let custom = Custom {
            name: Utf8String::from("Point"),
            args: vec![Value::Integer(1), Value::Integer(2)],
        };
        let result = rewrite(custom.clone(), p()).unwrap();
        assert_eq!(result, Value::Custom(custom));
    }

    #[test]
    fn wrong_arg_count_is_error() {
        let custom = Custom {
            name: Utf8String::from("::Integer"),
            args: vec![],
        };
        assert_eq!(rewrite(custom, p()), Err(Error::OptIntArgCount(p())));

        let custom = Custom {
            name: Utf8String::from("::Integer"),
            args: vec![Value::Integer(1), Value::Integer(2), Value::Integer(3)],
        };
        assert_eq!(rewrite(custom, p()), Err(Error::OptIntArgCount(p())));
    }

    #[test]
    fn non_string_arg0_is_error() {
        let custom = Custom {
            name: Utf8String::from("::Integer"),
            args: vec![Value::Integer(1)],
        };
        assert_eq!(rewrite(custom, p()), Err(Error::OptIntArg0NotString(p())));
    }

    #[test]
    fn non_integer_arg1_is_error() {
        let custom = Custom {
            name: Utf8String::from("::Integer"),
            args: vec![
                Value::String(Utf8String::from("1")),
                Value::String(Utf8String::from("oops")),
            ],
        };
        assert_eq!(rewrite(custom, p()), Err(Error::OptIntArg1NotInt(p())));
    }

    #[test]
    fn negative_base_is_a_range_error_not_a_type_error() {
        let custom = Custom {
            name: Utf8String::from("::Integer"),
            args: vec![
                Value::String(Utf8String::from("5")),
                Value::Integer(-1),
            ],
        };
        assert_eq!(rewrite(custom, p()), Err(Error::StrToIntBase));
    }
}
