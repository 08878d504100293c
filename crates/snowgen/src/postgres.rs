//! Postgres column binding for [`SnowflakeId`].
//!
//! IDs are written as `INT8`. Reading also accepts `TEXT`, `VARCHAR` and
//! `BYTEA` columns holding a UTF-8 decimal integer, so IDs stored in
//! text-typed columns load the same way.

use std::error::Error as StdError;

use bytes::BytesMut;
use postgres_types::{FromSql, IsNull, ToSql, Type, to_sql_checked};

use crate::{Error, SnowflakeId};

type BoxError = Box<dyn StdError + Sync + Send>;

impl ToSql for SnowflakeId {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, BoxError> {
        self.to_raw().to_sql(ty, out)
    }

    fn accepts(ty: &Type) -> bool {
        *ty == Type::INT8
    }

    to_sql_checked!();
}

impl FromSql<'_> for SnowflakeId {
    fn from_sql(ty: &Type, raw: &[u8]) -> Result<Self, BoxError> {
        if *ty == Type::INT8 {
            Ok(Self::from_raw(i64::from_sql(ty, raw)?))
        } else if is_decimal_text(ty) {
            let text = core::str::from_utf8(raw).map_err(Error::from)?;
            Ok(text.parse::<Self>()?)
        } else {
            Err(Box::new(Error::UnsupportedScalar {
                kind: ty.name().to_owned(),
            }))
        }
    }

    fn accepts(ty: &Type) -> bool {
        *ty == Type::INT8 || is_decimal_text(ty)
    }
}

fn is_decimal_text(ty: &Type) -> bool {
    *ty == Type::TEXT || *ty == Type::VARCHAR || *ty == Type::BYTEA
}
