//! `multipart/form-data` parsing for product create and update.

use axum::body::Bytes;
use axum::extract::Multipart;
use mongodb::bson::oid::ObjectId;
use std::str::FromStr;

use crate::error::{ProductError, ProductResult};
use crate::models::ProductFields;

/// Image part of a product form, not yet stored
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Parsed product form: typed fields plus the optional image
#[derive(Debug, Default)]
pub struct ProductForm {
    pub fields: ProductFields,
    pub image: Option<Upload>,
}

impl ProductForm {
    /// Read every part of the body.
    ///
    /// Unknown parts are ignored. An empty file part counts as no image.
    pub async fn from_multipart(mut multipart: Multipart) -> ProductResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            if name == "image" {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                form.set_image(file_name, content_type, bytes)?;
            } else {
                let value = field.text().await?;
                form.set_text(&name, &value)?;
            }
        }

        Ok(form)
    }

    fn set_image(&mut self, file_name: String, content_type: String, bytes: Bytes) -> ProductResult<()> {
        if bytes.is_empty() {
            return Ok(());
        }
        if !content_type.starts_with("image/") {
            return Err(ProductError::Validation(format!(
                "image must be an image/* file, got '{}'",
                content_type
            )));
        }

        self.image = Some(Upload {
            file_name,
            content_type,
            bytes,
        });
        Ok(())
    }

    fn set_text(&mut self, name: &str, value: &str) -> ProductResult<()> {
        let fields = &mut self.fields;
        match name {
            "name" => fields.name = Some(value.trim().to_string()),
            "price" => fields.price = Some(parse_price(value)?),
            "quantity" => fields.quantity = Some(parse_number(name, value)?),
            "sold" => fields.sold = Some(parse_number(name, value)?),
            "description" => fields.description = Some(value.to_string()),
            "categories" | "categories[]" => {
                let ids = parse_category_ids(value)?;
                fields.categories.get_or_insert_with(Vec::new).extend(ids);
            }
            _ => {}
        }
        Ok(())
    }
}

fn parse_number<T: FromStr>(field: &str, raw: &str) -> ProductResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| ProductError::Validation(format!("{} must be a number, got '{}'", field, raw)))
}

fn parse_price(raw: &str) -> ProductResult<f64> {
    let price: f64 = parse_number("price", raw)?;
    if !price.is_finite() {
        return Err(ProductError::Validation(format!(
            "price must be a finite number, got '{}'",
            raw
        )));
    }
    Ok(price)
}

/// Comma-separated hex ids; blanks are skipped
fn parse_category_ids(raw: &str) -> ProductResult<Vec<ObjectId>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            ObjectId::parse_str(s)
                .map_err(|_| ProductError::Validation(format!("invalid category id '{}'", s)))
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod fixture {
    //! Hand-built multipart bodies for tests

    pub const BOUNDARY: &str = "catalog-boundary";

    pub enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a str, &'a str, &'a [u8]),
    }

    pub fn content_type() -> String {
        format!("multipart/form-data; boundary={}", BOUNDARY)
    }

    pub fn body(parts: &[Part<'_>]) -> Vec<u8> {
        let mut out = Vec::new();
        for part in parts {
            out.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            match part {
                Part::Text(name, value) => {
                    out.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                            name, value
                        )
                        .as_bytes(),
                    );
                }
                Part::File(name, file_name, content_type, bytes) => {
                    out.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                            name, file_name, content_type
                        )
                        .as_bytes(),
                    );
                    out.extend_from_slice(bytes);
                    out.extend_from_slice(b"\r\n");
                }
            }
        }
        out.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        out
    }
}
