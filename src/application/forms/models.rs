//! Concrete forms of the admin console and their field rules.

use gratiswag_api_types::{
    BlogPayload, CategoryPayload, ChangePasswordRequest, ForgotPasswordRequest, LoginRequest,
    ProductPayload, ProfilePayload, ResetPasswordRequest, VerifyOtpRequest,
};

use super::{FormModel, validators::ValidationErrors};

const OTP_DIGITS: usize = 6;
const PASSWORD_MIN_LEN: usize = 6;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlogForm {
    pub blog_title: String,
    pub blog_description: String,
}

impl FormModel for BlogForm {
    type Payload = BlogPayload;

    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.required_min_len("blogTitle", &self.blog_title, 3);
        errors.required_min_len("blogDescription", &self.blog_description, 10);
        errors
    }

    fn payload(&self) -> BlogPayload {
        BlogPayload {
            blog_title: self.blog_title.trim().to_string(),
            blog_description: self.blog_description.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryForm {
    pub title: String,
}

impl FormModel for CategoryForm {
    type Payload = CategoryPayload;

    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.required_min_len("title", &self.title, 2);
        errors
    }

    fn payload(&self) -> CategoryPayload {
        CategoryPayload {
            title: self.title.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
    pub category: String,
}

impl FormModel for ProductForm {
    type Payload = ProductPayload;

    const IMAGE_FIELD: &'static str = "productImage";

    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.required("title", &self.title);
        errors.required("description", &self.description);
        errors.positive("price", self.price);
        errors.non_negative_count("quantity", self.quantity);
        errors.required("category", &self.category);
        errors
    }

    fn payload(&self) -> ProductPayload {
        ProductPayload {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            price: self.price,
            quantity: u32::try_from(self.quantity.max(0)).unwrap_or(u32::MAX),
            category: self.category.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl FormModel for ProfileForm {
    type Payload = ProfilePayload;

    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.required("name", &self.name);
        errors.email("email", &self.email);
        errors
    }

    fn payload(&self) -> ProfilePayload {
        ProfilePayload {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self
                .phone
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangePasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl FormModel for ChangePasswordForm {
    type Payload = ChangePasswordRequest;

    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.required("currentPassword", &self.current_password);
        errors.required_min_len("newPassword", &self.new_password, PASSWORD_MIN_LEN);
        errors.matches("confirmPassword", &self.confirm_password, &self.new_password);
        errors
    }

    fn payload(&self) -> ChangePasswordRequest {
        ChangePasswordRequest {
            current_password: self.current_password.clone(),
            new_password: self.new_password.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl FormModel for LoginForm {
    type Payload = LoginRequest;

    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.email("email", &self.email);
        errors.required("password", &self.password);
        errors
    }

    fn payload(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForgotPasswordForm {
    pub email: String,
}

impl FormModel for ForgotPasswordForm {
    type Payload = ForgotPasswordRequest;

    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.email("email", &self.email);
        errors
    }

    fn payload(&self) -> ForgotPasswordRequest {
        ForgotPasswordRequest {
            email: self.email.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyOtpForm {
    pub otp: String,
}

impl FormModel for VerifyOtpForm {
    type Payload = VerifyOtpRequest;

    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.digits("otp", &self.otp, OTP_DIGITS);
        errors
    }

    fn payload(&self) -> VerifyOtpRequest {
        VerifyOtpRequest {
            otp: self.otp.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetPasswordForm {
    pub new_password: String,
    pub confirm_password: String,
}

impl FormModel for ResetPasswordForm {
    type Payload = ResetPasswordRequest;

    fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.required_min_len("newPassword", &self.new_password, PASSWORD_MIN_LEN);
        errors.matches("confirmPassword", &self.confirm_password, &self.new_password);
        errors
    }

    fn payload(&self) -> ResetPasswordRequest {
        ResetPasswordRequest {
            new_password: self.new_password.clone(),
        }
    }
}
