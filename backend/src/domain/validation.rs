//! Structural validation of write-request bodies.
//!
//! Each form input type is a bag of raw strings exactly as submitted. Its
//! `validate` method evaluates every constraint and either returns the typed
//! field set or the full list of [`Violation`]s; validation never
//! short-circuits, so the caller can report every offending field at once.
//! No database interaction happens before validation passes.

use serde::{Deserialize, Serialize};

use super::credentials::PASSWORD_MIN;
use super::listing::{ListingFields, PLACEHOLDER_IMAGE_URL};
use super::review::{Rating, RATING_MAX, RATING_MIN};
use super::user::{Email, Username};

/// Maximum allowed length for a listing title.
pub const TITLE_MAX: usize = 100;

/// A single failed constraint, naming the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

impl Violation {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    fn required(field: &'static str) -> Self {
        Self::new(field, format!("{field} is required"))
    }
}

/// Join violations into the single client-facing message.
pub fn joined_message(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|violation| violation.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn check_required(value: &str, field: &'static str, violations: &mut Vec<Violation>) {
    if value.trim().is_empty() {
        violations.push(Violation::required(field));
    }
}

/// Raw listing create/update body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub country: String,
}

impl ListingInput {
    /// Evaluate every constraint against the raw body.
    pub fn validate(self) -> Result<ListingFields, Vec<Violation>> {
        let mut violations = Vec::new();

        check_required(&self.title, "title", &mut violations);
        if self.title.chars().count() > TITLE_MAX {
            violations.push(Violation::new(
                "title",
                format!("title must be at most {TITLE_MAX} characters"),
            ));
        }
        check_required(&self.description, "description", &mut violations);
        check_required(&self.location, "location", &mut violations);
        check_required(&self.country, "country", &mut violations);

        let price = if self.price.trim().is_empty() {
            violations.push(Violation::required("price"));
            None
        } else {
            match self.price.trim().parse::<i64>() {
                Ok(price) if price >= 0 => Some(price),
                Ok(_) => {
                    violations.push(Violation::new("price", "price must not be negative"));
                    None
                }
                Err(_) => {
                    violations.push(Violation::new("price", "price must be a whole number"));
                    None
                }
            }
        };

        if !violations.is_empty() {
            return Err(violations);
        }

        let image_url = if self.image_url.trim().is_empty() {
            PLACEHOLDER_IMAGE_URL.to_owned()
        } else {
            self.image_url.trim().to_owned()
        };

        Ok(ListingFields {
            title: self.title.trim().to_owned(),
            description: self.description.trim().to_owned(),
            image_url,
            // Checked above; violations is empty here.
            price: price.unwrap_or_default(),
            location: self.location.trim().to_owned(),
            country: self.country.trim().to_owned(),
        })
    }
}

/// Typed output of review-body validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewFields {
    pub rating: Rating,
    pub comment: String,
}

/// Raw review create body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewInput {
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub comment: String,
}

impl ReviewInput {
    /// Evaluate every constraint against the raw body.
    pub fn validate(self) -> Result<ReviewFields, Vec<Violation>> {
        let mut violations = Vec::new();

        let rating = if self.rating.trim().is_empty() {
            violations.push(Violation::required("rating"));
            None
        } else {
            match self.rating.trim().parse::<i32>() {
                Ok(value) => match Rating::try_new(value) {
                    Ok(rating) => Some(rating),
                    Err(error) => {
                        violations.push(Violation::new("rating", error.to_string()));
                        None
                    }
                },
                Err(_) => {
                    violations.push(Violation::new(
                        "rating",
                        format!("rating must be a whole number between {RATING_MIN} and {RATING_MAX}"),
                    ));
                    None
                }
            }
        };

        check_required(&self.comment, "comment", &mut violations);

        match (rating, violations.is_empty()) {
            (Some(rating), true) => Ok(ReviewFields {
                rating,
                comment: self.comment.trim().to_owned(),
            }),
            _ => Err(violations),
        }
    }
}

/// Typed output of signup-body validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupFields {
    pub username: Username,
    pub email: Email,
    pub password: String,
}

/// Raw registration body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupInput {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl SignupInput {
    /// Evaluate every constraint against the raw body.
    pub fn validate(self) -> Result<SignupFields, Vec<Violation>> {
        let mut violations = Vec::new();

        let username = match Username::new(self.username) {
            Ok(username) => Some(username),
            Err(error) => {
                violations.push(Violation::new("username", error.to_string()));
                None
            }
        };
        let email = match Email::new(self.email) {
            Ok(email) => Some(email),
            Err(error) => {
                violations.push(Violation::new("email", error.to_string()));
                None
            }
        };
        if self.password.chars().count() < PASSWORD_MIN {
            violations.push(Violation::new(
                "password",
                format!("password must be at least {PASSWORD_MIN} characters"),
            ));
        }

        match (username, email, violations.is_empty()) {
            (Some(username), Some(email), true) => Ok(SignupFields {
                username,
                email,
                password: self.password,
            }),
            _ => Err(violations),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn valid_listing_input() -> ListingInput {
        ListingInput {
            title: "Cabin".to_owned(),
            description: "A quiet cabin".to_owned(),
            image_url: String::new(),
            price: "100".to_owned(),
            location: "X".to_owned(),
            country: "Y".to_owned(),
        }
    }

    #[test]
    fn valid_listing_body_parses() {
        let fields = valid_listing_input().validate().expect("valid body");
        assert_eq!(fields.title, "Cabin");
        assert_eq!(fields.price, 100);
    }

    #[test]
    fn empty_image_url_falls_back_to_placeholder() {
        let fields = valid_listing_input().validate().expect("valid body");
        assert_eq!(fields.image_url, PLACEHOLDER_IMAGE_URL);
    }

    #[test]
    fn missing_price_is_a_violation() {
        let input = ListingInput {
            price: String::new(),
            ..valid_listing_input()
        };
        let violations = input.validate().unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "price");
    }

    #[test]
    fn every_violated_field_is_reported() {
        let violations = ListingInput::default().validate().unwrap_err();
        let fields: Vec<_> = violations.iter().map(|violation| violation.field).collect();
        assert_eq!(
            fields,
            vec!["title", "description", "location", "country", "price"]
        );

        let message = joined_message(&violations);
        for field in ["title", "description", "location", "country", "price"] {
            assert!(message.contains(field), "message should mention {field}");
        }
    }

    #[rstest]
    #[case("-5", "price must not be negative")]
    #[case("ten", "price must be a whole number")]
    #[case("1.5", "price must be a whole number")]
    fn bad_prices_are_reported(#[case] raw: &str, #[case] expected: &str) {
        let input = ListingInput {
            price: raw.to_owned(),
            ..valid_listing_input()
        };
        let violations = input.validate().unwrap_err();
        assert_eq!(violations[0].message, expected);
    }

    #[test]
    fn valid_review_body_parses() {
        let input = ReviewInput {
            rating: "5".to_owned(),
            comment: "Great".to_owned(),
        };
        let fields = input.validate().expect("valid body");
        assert_eq!(fields.rating.value(), 5);
        assert_eq!(fields.comment, "Great");
    }

    #[rstest]
    #[case("0")]
    #[case("6")]
    #[case("five")]
    #[case("")]
    fn bad_ratings_are_violations(#[case] raw: &str) {
        let input = ReviewInput {
            rating: raw.to_owned(),
            comment: "fine".to_owned(),
        };
        let violations = input.validate().unwrap_err();
        assert_eq!(violations[0].field, "rating");
    }

    #[test]
    fn review_violations_cover_both_fields() {
        let violations = ReviewInput::default().validate().unwrap_err();
        let fields: Vec<_> = violations.iter().map(|violation| violation.field).collect();
        assert_eq!(fields, vec!["rating", "comment"]);
    }

    #[test]
    fn signup_reports_all_bad_fields() {
        let input = SignupInput {
            username: "a".to_owned(),
            email: "nope".to_owned(),
            password: "short".to_owned(),
        };
        let violations = input.validate().unwrap_err();
        let fields: Vec<_> = violations.iter().map(|violation| violation.field).collect();
        assert_eq!(fields, vec!["username", "email", "password"]);
    }

    #[test]
    fn valid_signup_parses() {
        let input = SignupInput {
            username: "ada_lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            password: "long enough secret".to_owned(),
        };
        assert!(input.validate().is_ok());
    }
}
