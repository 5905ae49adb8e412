// Use Case Layer - Thin orchestrators over ports
//
// Use cases map transfer objects to domain models, call repositories
// (through the transaction manager whenever more than one mutating call
// must be atomic) and map results back. They never touch a connection
// directly and they propagate classified errors unchanged.

pub mod auth;
pub mod category;
pub mod dto;
pub mod post;
pub mod user;

pub use auth::AuthUseCase;
pub use category::CategoryUseCase;
pub use dto::{
    AddCategoryDto, AddPostDto, AddUserDto, CategoryDto, ChangePasswordDto, LoggedInUserDto,
    LoginDto, PostDto, PostWithAuthorDto, UpdatePostDto, UpdateUserDto, UserDto,
};
pub use post::PostUseCase;
pub use user::UserUseCase;

#[cfg(test)]
mod support;
