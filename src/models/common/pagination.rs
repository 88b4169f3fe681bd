use serde::{Deserialize, Serialize};

// 分页查询参数
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationQuery {
    #[serde(
        default = "default_page",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub page: i64,
    #[serde(
        default = "default_size",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub size: i64,
}

// 分页响应信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

// 自定义反序列化函数，支持字符串到i64的转换
fn deserialize_string_to_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, Unexpected, Visitor};
    use std::fmt;

    struct I64Visitor;

    impl<'de> Visitor<'de> for I64Visitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a string containing an integer")
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            if value <= i64::MAX as u64 {
                Ok(value as i64)
            } else {
                Err(Error::invalid_value(Unexpected::Unsigned(value), &self))
            }
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            value
                .parse()
                .map_err(|_| Error::invalid_value(Unexpected::Str(value), &self))
        }
    }

    deserializer.deserialize_any(I64Visitor)
}

/// 可选整数参数；与 `#[serde(flatten)]` 同用时查询串的值都是字符串
pub fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    deserialize_string_to_i64(deserializer).map(Some)
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self { page: 1, size: 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Params {
        #[serde(flatten)]
        pagination: PaginationQuery,
        search: Option<String>,
    }

    #[test]
    fn test_pagination_from_query_string() {
        let params = actix_web::web::Query::<Params>::from_query("page=3&size=25&search=10A")
            .unwrap()
            .into_inner();
        assert_eq!(params.pagination.page, 3);
        assert_eq!(params.pagination.size, 25);
        assert_eq!(params.search.as_deref(), Some("10A"));
    }

    #[derive(Debug, Deserialize)]
    struct FilteredParams {
        #[serde(flatten)]
        pagination: PaginationQuery,
        #[serde(default, deserialize_with = "deserialize_optional_i64")]
        class_id: Option<i64>,
    }

    #[test]
    fn test_optional_id_alongside_pagination() {
        let params = actix_web::web::Query::<FilteredParams>::from_query("class_id=7&page=2")
            .unwrap()
            .into_inner();
        assert_eq!(params.class_id, Some(7));
        assert_eq!(params.pagination.page, 2);

        let params = actix_web::web::Query::<FilteredParams>::from_query("")
            .unwrap()
            .into_inner();
        assert_eq!(params.class_id, None);
        assert!(actix_web::web::Query::<FilteredParams>::from_query("class_id=abc").is_err());
    }

    #[test]
    fn test_pagination_defaults() {
        let params = actix_web::web::Query::<Params>::from_query("")
            .unwrap()
            .into_inner();
        assert_eq!(params.pagination.page, 1);
        assert_eq!(params.pagination.size, 10);
    }
}
