// Parsing of compact sort and filter expressions used on the command line
use super::error::FilterError;
use super::types::{FilterConfig, FilterOperator, SortConfig, SortDirection};

pub struct FilterParser;

impl FilterParser {
    /// `"name:desc,email"` style sort expressions; direction defaults to asc
    pub fn parse_sort(s: &str) -> Result<Vec<SortConfig>, FilterError> {
        let mut out = Vec::new();
        for part in s.split(',') {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                continue;
            }
            let mut it = trimmed.splitn(2, ':');
            let field = it.next().unwrap_or_default().trim();
            if field.is_empty() {
                return Err(FilterError::InvalidSortExpr(trimmed.to_string()));
            }
            let direction = SortDirection::parse(it.next().unwrap_or("asc").trim());
            out.push(SortConfig {
                field: field.to_string(),
                direction,
            });
        }
        Ok(out)
    }

    /// `field:operator[:value]`; the value may itself contain colons
    pub fn parse_filter(s: &str) -> Result<FilterConfig, FilterError> {
        let mut it = s.splitn(3, ':');
        let field = it.next().unwrap_or_default().trim();
        let operator = it
            .next()
            .ok_or_else(|| FilterError::InvalidFilterExpr(s.to_string()))?;
        if field.is_empty() {
            return Err(FilterError::InvalidFilterExpr(s.to_string()));
        }

        let operator: FilterOperator = operator.parse()?;
        let value = it.next().unwrap_or_default().to_string();
        if operator.requires_value() && value.is_empty() {
            return Err(FilterError::InvalidFilterExpr(format!(
                "{} requires a value",
                operator
            )));
        }

        Ok(FilterConfig {
            field: field.to_string(),
            operator,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sort_lists() {
        let sort = FilterParser::parse_sort("name:desc, email").unwrap();
        assert_eq!(sort.len(), 2);
        assert_eq!(sort[0].direction, SortDirection::Desc);
        assert_eq!(sort[1].field, "email");
        assert_eq!(sort[1].direction, SortDirection::Asc);
    }

    #[test]
    fn parses_filters_with_colon_values() {
        let filter = FilterParser::parse_filter("url:like:https://x").unwrap();
        assert_eq!(filter.operator, FilterOperator::Like);
        assert_eq!(filter.value, "https://x");

        let null = FilterParser::parse_filter("deleted_at:is_null").unwrap();
        assert_eq!(null.value, "");

        assert_eq!(
            FilterParser::parse_filter("name:eq"),
            Err(FilterError::InvalidFilterExpr("eq requires a value".to_string()))
        );
        assert_eq!(
            FilterParser::parse_filter("name"),
            Err(FilterError::InvalidFilterExpr("name".to_string()))
        );
        assert_eq!(
            FilterParser::parse_filter(":eq:x"),
            Err(FilterError::InvalidFilterExpr(":eq:x".to_string()))
        );
    }
}
