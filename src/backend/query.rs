/// Row filter on a single column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Eq { column: String, value: String },
    In { column: String, values: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub descending: bool,
}

/// A read or delete against one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub collection: String,
    pub columns: String,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
}

impl Query {
    pub fn table(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            columns: "*".to_string(),
            filters: Vec::new(),
            order: None,
        }
    }

    pub fn columns(mut self, columns: impl Into<String>) -> Self {
        self.columns = columns.into();
        self
    }

    pub fn eq(
        mut self,
        column: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.filters.push(Filter::Eq {
            column: column.into(),
            value: value.into(),
        });
        self
    }

    pub fn in_list<I, S>(mut self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.push(Filter::In {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn order(mut self, column: impl Into<String>, descending: bool) -> Self {
        self.order = Some(Order {
            column: column.into(),
            descending,
        });
        self
    }

    /// Query-string pairs in the backend's filter syntax:
    /// `select=*`, `status=eq.x`, `status=in.(a,b)`, `order=col.desc`.
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), self.columns.clone())];

        for filter in &self.filters {
            match filter {
                Filter::Eq { column, value } => {
                    params.push((column.clone(), format!("eq.{value}")));
                }
                Filter::In { column, values } => {
                    let list = values
                        .iter()
                        .map(|v| quote_list_value(v))
                        .collect::<Vec<_>>()
                        .join(",");
                    params.push((column.clone(), format!("in.({list})")));
                }
            }
        }

        if let Some(order) = &self.order {
            let direction = if order.descending { "desc" } else { "asc" };
            params.push((
                "order".to_string(),
                format!("{}.{direction}", order.column),
            ));
        }

        params
    }

    /// `params()` encoded as a query string, without the leading `?`.
    pub fn query_string(&self) -> String {
        self.params()
            .iter()
            .map(|(k, v)| {
                format!("{}={}", urlencoding::encode(k), urlencoding::encode(v))
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

fn quote_list_value(value: &str) -> String {
    if value.contains([',', '(', ')', '"', ' ']) {
        format!("\"{}\"", value.replace('"', "\\\""))
    } else {
        value.to_string()
    }
}
