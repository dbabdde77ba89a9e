pub mod carts;
pub mod items;

pub mod envelope {
    use chrono::Utc;
    use serde::Serialize;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Meta {
        pub timestamp: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub page: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub limit: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub total: Option<u64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub total_pages: Option<u64>,
    }

    impl Meta {
        fn now() -> Self {
            Self {
                timestamp: Utc::now().timestamp_millis().to_string(),
                page: None,
                limit: None,
                total: None,
                total_pages: None,
            }
        }
    }

    #[derive(Serialize)]
    pub struct ApiResponse<T> {
        pub data: T,
        pub meta: Meta,
    }

    impl<T> ApiResponse<T> {
        pub fn new(data: T) -> Self {
            Self {
                data,
                meta: Meta::now(),
            }
        }

        pub fn paginated(data: T, page: u64, limit: u64, total: u64, total_pages: u64) -> Self {
            Self {
                data,
                meta: Meta {
                    page: Some(page),
                    limit: Some(limit),
                    total: Some(total),
                    total_pages: Some(total_pages),
                    ..Meta::now()
                },
            }
        }
    }

}
